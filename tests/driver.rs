use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use kira_gentest::cascade::{Driver, KeywordPolicy};
use kira_gentest::input::Report;
use kira_gentest::labels::{Label, Marker, StageKind};

mod common;

fn reports() -> Vec<Report> {
    let texts = [
        "EGFR mutation analysis performed, no mutation detected",
        "no ALK testing documented",
        "ALK FISH positive",
        "",
        "\u{0}garbage",
        "EGFR+ by mutation analysis. ALK negative",
        "no ALK result, insufficient tumor",
    ];
    (0..40)
        .map(|i| Report::new(format!("r{:03}", i), texts[i % texts.len()]))
        .collect()
}

#[test]
fn records_are_report_major_then_marker() {
    let reports = reports();
    let out = Driver::new(common::cascades(KeywordPolicy::Ensemble))
        .with_threads(2)
        .run(&reports)
        .unwrap();
    assert!(!out.cancelled);
    assert_eq!(out.records.len(), reports.len() * 2);
    for (i, pair) in out.records.chunks(2).enumerate() {
        assert_eq!(pair[0].report_id, reports[i].id);
        assert_eq!(pair[0].marker, Marker::Egfr);
        assert_eq!(pair[1].report_id, reports[i].id);
        assert_eq!(pair[1].marker, Marker::Alk);
    }
}

#[test]
fn results_do_not_depend_on_thread_count() {
    let reports = reports();
    let single = Driver::new(common::cascades(KeywordPolicy::Ensemble))
        .with_threads(1)
        .run(&reports)
        .unwrap();
    let many = Driver::new(common::cascades(KeywordPolicy::Ensemble))
        .with_threads(4)
        .run(&reports)
        .unwrap();
    assert_eq!(single.records, many.records);
    assert_eq!(single.summaries, many.summaries);
}

#[test]
fn failures_are_counted_not_dropped() {
    let reports = reports();
    let out = Driver::new(common::cascades(KeywordPolicy::Ensemble))
        .run(&reports)
        .unwrap();
    let failed = reports.iter().filter(|r| r.text.contains('\0')).count();
    assert!(failed > 0);
    for summary in &out.summaries {
        assert_eq!(summary.total, reports.len());
        assert_eq!(summary.failures, failed);
        assert_eq!(summary.terminal.get("failed").copied(), Some(failed));
        assert_eq!(
            summary.count(Label::Reported) + summary.count(Label::NotReported),
            reports.len() - failed
        );
    }
    let alk = out.summaries.iter().find(|s| s.marker == Marker::Alk).unwrap();
    assert!(alk.affirmative(StageKind::Method) > 0);
}

#[test]
fn cancellation_stops_before_reports() {
    let flag = Arc::new(AtomicBool::new(true));
    let out = Driver::new(common::cascades(KeywordPolicy::Ensemble))
        .with_cancel(flag)
        .run(&reports())
        .unwrap();
    assert!(out.cancelled);
    assert!(out.records.is_empty());
    assert!(out.summaries.iter().all(|s| s.total == 0));
}

#[test]
fn empty_input_is_not_an_error() {
    let out = Driver::new(common::cascades(KeywordPolicy::Ensemble))
        .run(&[])
        .unwrap();
    assert!(out.records.is_empty());
    assert_eq!(out.summaries.len(), 2);
}
