use super::*;

#[test]
fn empty_criterion_matches_everything() {
    let c = MatchCriterion::new(Vec::<&str>::new());

    assert!(c.is_wildcard());
    assert!(c.is_empty());
    for name in ["node_modules", "src", ".git", ""] {
        assert!(c.matches(OsStr::new(name)), "{name:?} should match wildcard");
    }
}

#[test]
fn keywords_match_exact_names_only() {
    let c = MatchCriterion::new(["node_modules", "target"]);

    let cases: &[(&str, bool)] = &[
        ("node_modules", true),
        ("target", true),
        ("node_modules_old", false),
        ("modules", false),
        ("Target", false),
        ("a/node_modules", false),
        ("", false),
    ];

    for (name, expected) in cases {
        assert_eq!(
            c.matches(OsStr::new(name)),
            *expected,
            "matches({name:?}) should be {expected}"
        );
    }
}

#[test]
fn duplicate_keywords_collapse() {
    let c: MatchCriterion = ["dist", "dist", "build"].into_iter().collect();

    assert_eq!(c.len(), 2);
    assert!(!c.is_wildcard());
    assert!(!c.is_empty());
    assert!(c.matches(OsStr::new("dist")));
}

#[test]
fn accepts_owned_strings() {
    let keywords = vec![String::from("vendor")];
    let c = MatchCriterion::new(&keywords);

    assert!(c.matches(OsStr::new("vendor")));
    assert!(!c.matches(OsStr::new("src")));
}
