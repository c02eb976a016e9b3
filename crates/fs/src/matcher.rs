use std::ffi::{OsStr, OsString};

use hashbrown::HashSet;

/// Set of directory names that trigger aggregation.
///
/// An empty set matches every directory. Otherwise a directory matches only
/// when its base name is exactly one of the keywords.
#[derive(Debug, Clone, Default)]
pub struct MatchCriterion {
    keywords: HashSet<OsString>,
}

impl MatchCriterion {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        keywords.into_iter().collect()
    }

    /// No keywords: every directory matches.
    pub fn is_wildcard(&self) -> bool {
        self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn matches(&self, name: &OsStr) -> bool {
        self.is_wildcard() || self.keywords.contains(name)
    }
}

impl<S: AsRef<OsStr>> FromIterator<S> for MatchCriterion {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        MatchCriterion {
            keywords: iter
                .into_iter()
                .map(|k| k.as_ref().to_os_string())
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
