use super::*;

use std::fs::{create_dir_all, write};

use chrono::Utc;
use clap::{CommandFactory, Parser};
use dirstat_runtime::PROGRAM_NAME;

use crate::Cli;

fn parse(argv: &[&str]) -> ScanArgs {
    Cli::try_parse_from(argv).expect("valid arguments").scan
}

fn record(path: &str, size_bytes: u64, file_count: u64) -> DirectoryRecord {
    DirectoryRecord {
        path: PathBuf::from(path),
        size_bytes,
        file_count,
        subdir_count: 0,
        last_modified: Utc::now(),
    }
}

fn paths(records: &[DirectoryRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.path.to_str().expect("utf8 path"))
        .collect()
}

#[test]
fn parses_path_keywords_and_flags() {
    let args = parse(&[
        "dirstat",
        "/srv",
        "node_modules",
        "target",
        "-j",
        "2",
        "--sort",
        "size",
        "--json",
        "-vv",
    ]);

    assert_eq!(args.path, PathBuf::from("/srv"));
    assert_eq!(
        args.keywords,
        vec![OsString::from("node_modules"), OsString::from("target")]
    );
    assert_eq!(args.workers, Some(2));
    assert_eq!(args.sort, SortKey::Size);
    assert_eq!(args.log_level(), Some(Level::Debug));
    assert_eq!(args.output.config().format, OutputFormat::Json);
    assert_eq!(args.options().workers, 2);
}

#[test]
fn defaults_without_flags() {
    let args = parse(&["dirstat", "."]);

    assert!(args.keywords.is_empty());
    assert_eq!(args.sort, SortKey::Path);
    assert_eq!(args.log_level(), None);
    assert_eq!(args.output.config().format, OutputFormat::Human);
    assert!(args.output.config().show_summary);
}

#[test]
fn verbosity_maps_to_levels() {
    let cases: &[(&str, Option<Level>)] = &[
        ("-v", Some(Level::Info)),
        ("-vv", Some(Level::Debug)),
        ("-vvv", Some(Level::Trace)),
        ("-vvvv", Some(Level::Trace)),
    ];

    for (flag, expected) in cases {
        let args = parse(&["dirstat", ".", *flag]);
        assert_eq!(args.log_level(), *expected, "flag {flag}");
    }
}

#[test]
fn command_is_named_after_the_program() {
    assert_eq!(Cli::command().get_name(), PROGRAM_NAME);
}

#[test]
fn missing_path_is_rejected() {
    assert!(Cli::try_parse_from(["dirstat"]).is_err());
}

#[test]
fn sort_records_by_each_key() {
    let mut records = vec![
        record("/c", 10, 1),
        record("/a", 10, 5),
        record("/b", 99, 2),
    ];

    sort_records(&mut records, SortKey::Path);
    assert_eq!(paths(&records), vec!["/a", "/b", "/c"]);

    sort_records(&mut records, SortKey::Size);
    assert_eq!(paths(&records), vec!["/b", "/a", "/c"]);

    sort_records(&mut records, SortKey::Files);
    assert_eq!(paths(&records), vec!["/a", "/b", "/c"]);
}

#[test]
fn execute_prints_sorted_records_and_succeeds() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    create_dir_all(root.join("b").join("node_modules")).expect("create b");
    create_dir_all(root.join("a").join("node_modules")).expect("create a");
    write(root.join("a").join("node_modules").join("f1"), b"test content").expect("write f1");

    let root_arg = root.to_str().expect("utf8 temp path");
    let args = parse(&["dirstat", root_arg, "node_modules", "--json"]);
    let mut printer = JsonPrinter::new(Vec::new(), Vec::new(), args.output.config());

    let status = execute(&args, &mut printer).expect("execute");
    assert_eq!(status, ScanStatus::Complete);

    let (out, err) = printer.into_inner();
    let rows: Vec<serde_json::Value> = String::from_utf8(out)
        .expect("utf8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0]["path"],
        root.join("a").join("node_modules").display().to_string()
    );
    assert_eq!(rows[0]["size_bytes"], 12);
    assert_eq!(rows[1]["size_bytes"], 0);

    let summary: serde_json::Value =
        serde_json::from_slice(&err).expect("summary json");
    assert_eq!(summary["records"], 2);
    assert_eq!(summary["failed"], 0);
}

#[test]
fn execute_fails_on_a_file_root() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("plain.txt");
    write(&file, b"x").expect("write file");

    let args = parse(&["dirstat", file.to_str().expect("utf8 temp path")]);
    let mut printer = JsonPrinter::new(Vec::new(), Vec::new(), args.output.config());

    let err = execute(&args, &mut printer).expect_err("file root must fail");
    assert!(format!("{err:#}").contains("is not a directory"));
}
