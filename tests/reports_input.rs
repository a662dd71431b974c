use std::collections::HashSet;
use std::fs;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use kira_gentest::input::Subset;
use kira_gentest::io::ids::read_id_list;
use kira_gentest::io::reports::{ReportColumns, read_reports};
use tempfile::TempDir;

mod common;

fn ids(items: &[&str]) -> Option<HashSet<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn reads_rows_and_optional_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports.tsv");
    common::write_reports(
        &path,
        &[("r1", "P1", "1", "EGFR negative"), ("r2", "P2", "", "ALK positive")],
    );
    let table = read_reports(&path, &ReportColumns::default(), &Subset::default()).unwrap();
    assert_eq!(table.rows_read, 2);
    assert!(table.has_patients);
    assert_eq!(table.reports[0].case_id().as_deref(), Some("P1_1"));
    assert_eq!(table.reports[1].tumor, None);
    assert_eq!(table.reports[1].case_id().as_deref(), Some("P2"));
    assert_eq!(table.reports[1].accession, None);
}

#[test]
fn gz_input_is_decoded() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports.tsv.gz");
    let mut enc = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    enc.write_all(b"source_id\tfull_path_text\nr1\tALK FISH positive\n")
        .unwrap();
    enc.finish().unwrap();

    let table = read_reports(&path, &ReportColumns::default(), &Subset::default()).unwrap();
    assert_eq!(table.reports.len(), 1);
    assert!(!table.has_patients);
}

#[test]
fn differing_row_length_names_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports.tsv");
    fs::write(&path, "source_id\tfull_path_text\nr1\tok\nr2\ttoo\tmany\n").unwrap();
    let err = read_reports(&path, &ReportColumns::default(), &Subset::default()).unwrap_err();
    assert!(err.to_string().contains(":3 differing row length"), "{}", err);
}

#[test]
fn missing_text_column_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports.tsv");
    fs::write(&path, "source_id\tbody\nr1\tok\n").unwrap();
    let err = read_reports(&path, &ReportColumns::default(), &Subset::default()).unwrap_err();
    assert!(err.to_string().contains("'full_path_text' not found"));

    let columns = ReportColumns {
        id: "source_id".to_string(),
        text: "body".to_string(),
    };
    assert_eq!(read_reports(&path, &columns, &Subset::default()).unwrap().reports.len(), 1);
}

#[test]
fn binary_bytes_are_decoded_lossily() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports.tsv");
    let mut bytes = b"source_id\tfull_path_text\nr1\t".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0x00, 0x41]);
    bytes.push(b'\n');
    fs::write(&path, bytes).unwrap();
    let table = read_reports(&path, &ReportColumns::default(), &Subset::default()).unwrap();
    assert!(table.reports[0].text.contains('\u{FFFD}'));
}

#[test]
fn subsets_filter_records_patients_and_cases() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports.tsv");
    common::write_reports(
        &path,
        &[
            ("r1", "P1", "1", "a"),
            ("r2", "P1", "2", "b"),
            ("r3", "P2", "1", "c"),
        ],
    );
    let columns = ReportColumns::default();

    let only = Subset {
        records: ids(&["r1", "r3"]),
        ..Subset::default()
    };
    let table = read_reports(&path, &columns, &only).unwrap();
    assert_eq!(table.reports.len(), 2);
    assert_eq!(table.skipped, 1);

    let patients = Subset {
        patients: ids(&["P1"]),
        skip_cases: ids(&["P1_2"]),
        ..Subset::default()
    };
    let table = read_reports(&path, &columns, &patients).unwrap();
    let kept: Vec<&str> = table.reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(kept, vec!["r1"]);
}

#[test]
fn id_list_is_whitespace_separated() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ids.txt");
    fs::write(&path, "r1 r2\n\tr3\n\n").unwrap();
    let list = read_id_list(&path).unwrap();
    assert_eq!(list.len(), 3);
    assert!(list.contains("r3"));
}
