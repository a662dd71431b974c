use kira_gentest::cascade::{Branch, Cascade, DecidedBy, KeywordPolicy, Outcome};
use kira_gentest::error::CascadeError;
use kira_gentest::input::Report;
use kira_gentest::labels::{Label, Marker, StageKind};
use kira_gentest::model::ModelStore;
use kira_gentest::vectorize::{PatternFile, PatternSet, Vectorizer};

mod common;

use std::sync::Arc;

fn classify(marker: Marker, text: &str) -> kira_gentest::cascade::ClassificationRecord {
    common::cascade(marker, KeywordPolicy::Ensemble)
        .classify(&Report::new("r1", text))
        .unwrap()
}

#[test]
fn egfr_negative_by_mutational_analysis() {
    let record = classify(
        Marker::Egfr,
        "EGFR mutation analysis performed, no mutation detected",
    );
    assert_eq!(record.label(StageKind::Reported), Some(Label::Reported));
    assert_eq!(record.label(StageKind::Positive), Some(Label::Negative));
    assert_eq!(
        record.label(StageKind::Method),
        Some(Label::MutationalAnalysis)
    );
    assert_eq!(record.label(StageKind::Insufficient), None);
    assert_eq!(
        record.final_label(),
        "Reported/Negative/Mutational Analysis"
    );
}

#[test]
fn alk_not_documented_is_not_reported_unknown() {
    let record = classify(Marker::Alk, "no ALK testing documented");
    assert_eq!(record.label(StageKind::Reported), Some(Label::NotReported));
    assert_eq!(record.label(StageKind::Insufficient), Some(Label::Unknown));
    assert_eq!(record.label(StageKind::Positive), None);
    assert_eq!(record.label(StageKind::Method), None);
}

#[test]
fn alk_positive_by_fish() {
    let record = classify(Marker::Alk, "ALK FISH positive");
    assert_eq!(record.final_label(), "Reported/Positive/FISH");
}

#[test]
fn egfr_plus_sign_is_positive() {
    let record = classify(Marker::Egfr, "EGFR+ by mutation analysis");
    assert_eq!(
        record.final_label(),
        "Reported/Positive/Mutational Analysis"
    );
}

#[test]
fn insufficient_sample() {
    let record = classify(Marker::Alk, "no ALK result, insufficient tumor");
    assert_eq!(record.final_label(), "Not Reported/Insufficient");
}

#[test]
fn empty_text_not_reported_unknown() {
    for marker in Marker::ALL {
        let record = classify(marker, "");
        assert_eq!(record.final_label(), "Not Reported/Unknown");
        let branch = record.branch().unwrap();
        assert!((branch.reported().margin - (-0.5)).abs() < 1e-9);
    }
}

#[test]
fn malformed_text_fails_without_labels() {
    for marker in Marker::ALL {
        let record = classify(marker, "\u{0}\u{1}binary");
        assert!(record.is_failed());
        assert_eq!(record.final_label(), "failed");
        for stage in StageKind::ALL {
            assert_eq!(record.label(stage), None);
        }
        let Outcome::Failed { reason } = &record.outcome else {
            panic!("expected failure");
        };
        assert!(reason.contains("NUL"));
    }
}

#[test]
fn branches_are_exclusive() {
    let texts = [
        "",
        "EGFR mutation analysis performed, no mutation detected",
        "no ALK testing documented",
        "ALK FISH positive",
        "no ALK result, insufficient tumor",
        "EGFR+ by mutation analysis. ALK negative",
    ];
    for marker in Marker::ALL {
        let cascade = common::cascade(marker, KeywordPolicy::Ensemble);
        for text in texts {
            let record = cascade.classify(&Report::new("r", text)).unwrap();
            match record.branch().unwrap() {
                Branch::NotReported { reported, .. } => {
                    assert_eq!(reported.label, Label::NotReported);
                    assert!(record.label(StageKind::Positive).is_none());
                    assert!(record.label(StageKind::Method).is_none());
                }
                Branch::Reported { reported, .. } => {
                    assert_eq!(reported.label, Label::Reported);
                    assert!(record.label(StageKind::Insufficient).is_none());
                }
            }
        }
    }
}

#[test]
fn classification_is_deterministic() {
    let cascade = common::cascade(Marker::Egfr, KeywordPolicy::Ensemble);
    let report = Report::new("r", "EGFR mutation analysis performed, no mutation detected");
    let a = cascade.classify(&report).unwrap();
    let b = cascade.classify(&report).unwrap();
    assert_eq!(a, b);
}

fn always_reported_store() -> ModelStore {
    let mut store = ModelStore::new();
    for stage in StageKind::ALL {
        let mut spec = common::standard_stage(Marker::Alk, stage);
        if stage == StageKind::Reported {
            spec.bias = 1.0;
        }
        common::insert_stage(&mut store, Marker::Alk, stage, spec);
    }
    store
}

#[test]
fn gate_policy_short_circuits_without_mention() {
    let store = always_reported_store();
    let report = Report::new("r", "lung adenocarcinoma, no molecular studies");

    let ensemble =
        Cascade::new(Marker::Alk, &store, common::vectorizer(), KeywordPolicy::Ensemble).unwrap();
    let record = ensemble.classify(&report).unwrap();
    assert_eq!(record.label(StageKind::Reported), Some(Label::Reported));

    let gate = Cascade::new(Marker::Alk, &store, common::vectorizer(), KeywordPolicy::Gate).unwrap();
    let record = gate.classify(&report).unwrap();
    let branch = record.branch().unwrap();
    assert_eq!(branch.reported().label, Label::NotReported);
    assert_eq!(branch.reported().decided_by, DecidedBy::Keyword);
    assert_eq!(record.label(StageKind::Insufficient), Some(Label::Unknown));
}

#[test]
fn gate_policy_defers_to_classifier_on_mention() {
    let store = always_reported_store();
    let gate = Cascade::new(Marker::Alk, &store, common::vectorizer(), KeywordPolicy::Gate).unwrap();
    let record = gate.classify(&Report::new("r", "ALK FISH positive")).unwrap();
    let branch = record.branch().unwrap();
    assert_eq!(branch.reported().decided_by, DecidedBy::Classifier);
    assert_eq!(record.final_label(), "Reported/Positive/FISH");
}

#[test]
fn missing_stage_fails_construction() {
    let mut store = ModelStore::new();
    for stage in [StageKind::Reported, StageKind::Insufficient, StageKind::Positive] {
        common::insert_stage(&mut store, Marker::Egfr, stage, common::standard_stage(Marker::Egfr, stage));
    }
    let err = Cascade::new(Marker::Egfr, &store, common::vectorizer(), KeywordPolicy::Ensemble)
        .unwrap_err();
    assert!(matches!(
        err,
        CascadeError::MissingStage {
            marker: Marker::Egfr,
            stage: StageKind::Method
        }
    ));
}

#[test]
fn marker_without_patterns_fails_construction() {
    let file: PatternFile = serde_json::from_str(r#"{"tests":{"ALK":["alk"]}}"#).unwrap();
    let vectorizer = Arc::new(Vectorizer::new(Arc::new(PatternSet::compile(&file).unwrap())).unwrap());
    let err = Cascade::new(
        Marker::Egfr,
        &common::standard_store(),
        vectorizer,
        KeywordPolicy::Ensemble,
    )
    .unwrap_err();
    assert!(matches!(err, CascadeError::Config { marker: Marker::Egfr, .. }));
}
