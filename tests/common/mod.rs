#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use kira_gentest::cascade::{Cascade, KeywordPolicy};
use kira_gentest::labels::{Marker, StageKind};
use kira_gentest::model::{FeatureMap, LinearModel, ModelStore};
use kira_gentest::vectorize::{PatternFile, PatternSet, Vectorizer};

pub const PATTERNS_JSON: &str = r#"{
  "tests": { "EGFR": ["egfr"], "ALK": ["alk"], "KRAS": ["kras"] },
  "sections": { "_SECTION_ DIAGNOSIS": ["final diagnosis:?"] },
  "keywords": { "MUT_ANALYSIS": ["mutation analysis"] }
}"#;

pub struct StageSpec {
    pub features: Vec<String>,
    pub weights: Vec<f32>,
    pub bias: f32,
}

/// Hand-weighted stage models: a mention votes Reported unless preceded by
/// "no"; positive/negative words decide the result; the method keyword
/// decides the method.
pub fn standard_stage(marker: Marker, stage: StageKind) -> StageSpec {
    let (features, weights): (Vec<&str>, Vec<f32>) = match stage {
        StageKind::Reported => (
            vec![marker.name(), "immediately_pre_window=NO"],
            vec![1.0, -2.0],
        ),
        StageKind::Insufficient => (vec!["INSUFFICIENT"], vec![1.0]),
        StageKind::Positive => (
            vec!["post_window=POSITIVE", "post_window=NEGATIVE"],
            vec![1.0, -1.0],
        ),
        StageKind::Method => match marker {
            Marker::Egfr => (vec!["post_window=MUT_ANALYSIS"], vec![1.0]),
            Marker::Alk => (vec!["post_window=FISH"], vec![1.0]),
        },
    };
    StageSpec {
        features: features.into_iter().map(str::to_string).collect(),
        weights,
        bias: -0.5,
    }
}

pub fn write_stage(root: &Path, marker: Marker, stage: StageKind, spec: &StageSpec) {
    let dir = ModelStore::stage_dir(root, marker, stage);
    fs::create_dir_all(&dir).unwrap();
    let mut features = String::from("# name index\n");
    for (i, name) in spec.features.iter().enumerate() {
        features.push_str(&format!("{} {}\n", name, i));
    }
    fs::write(dir.join("features.txt"), features).unwrap();
    let model = serde_json::json!({
        "kind": "linear",
        "weights": spec.weights,
        "bias": spec.bias,
        "n_features": spec.weights.len(),
    });
    fs::write(dir.join("model.json"), model.to_string()).unwrap();
}

pub fn write_standard_models(root: &Path) {
    for marker in Marker::ALL {
        for stage in StageKind::ALL {
            write_stage(root, marker, stage, &standard_stage(marker, stage));
        }
    }
}

pub fn write_patterns(path: &Path) {
    fs::write(path, PATTERNS_JSON).unwrap();
}

pub fn patterns() -> Arc<PatternSet> {
    let file: PatternFile = serde_json::from_str(PATTERNS_JSON).unwrap();
    Arc::new(PatternSet::compile(&file).unwrap())
}

pub fn vectorizer() -> Arc<Vectorizer> {
    Arc::new(Vectorizer::new(patterns()).unwrap())
}

pub fn insert_stage(store: &mut ModelStore, marker: Marker, stage: StageKind, spec: StageSpec) {
    let map = FeatureMap::from_pairs(
        spec.features
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i)),
    )
    .unwrap();
    store
        .insert(marker, stage, map, LinearModel::new(spec.weights, spec.bias))
        .unwrap();
}

pub fn standard_store() -> ModelStore {
    let mut store = ModelStore::new();
    for marker in Marker::ALL {
        for stage in StageKind::ALL {
            insert_stage(&mut store, marker, stage, standard_stage(marker, stage));
        }
    }
    store
}

pub fn cascade(marker: Marker, policy: KeywordPolicy) -> Cascade {
    Cascade::new(marker, &standard_store(), vectorizer(), policy).unwrap()
}

pub fn cascades(policy: KeywordPolicy) -> Vec<Cascade> {
    Marker::ALL.iter().map(|m| cascade(*m, policy)).collect()
}

/// Rows of `(source_id, patient_id, tumor_record, full_path_text)`.
pub fn write_reports(path: &Path, rows: &[(&str, &str, &str, &str)]) {
    let mut out = String::from("source_id\tpatient_id\ttumor_record\tfull_path_text\n");
    for (id, patient, tumor, text) in rows {
        out.push_str(&format!("{}\t{}\t{}\t{}\n", id, patient, tumor, text));
    }
    fs::write(path, out).unwrap();
}
