use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::cascade::{Cascade, CaseTable, KeywordPolicy, RunOutput};
use crate::input::Report;
use crate::io::reports::ReportColumns;
use crate::labels::Marker;
use crate::model::ModelStore;
use crate::vectorize::PatternSet;

#[derive(Debug, Clone, Default)]
pub struct SubsetPaths {
    pub records: Option<PathBuf>,
    pub patients: Option<PathBuf>,
    pub skip_cases: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub records_tsv: PathBuf,
    pub cases_tsv: PathBuf,
    pub records_json: PathBuf,
    pub summary_json: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            records_tsv: out_dir.join("records.tsv"),
            cases_tsv: out_dir.join("cases.tsv"),
            records_json: out_dir.join("records.json"),
            summary_json: out_dir.join("summary.json"),
            out_dir,
        }
    }
}

#[derive(Debug)]
pub struct Ctx {
    pub input: Option<PathBuf>,
    pub models_dir: PathBuf,
    pub patterns_path: PathBuf,
    pub markers: Vec<Marker>,
    pub policy: KeywordPolicy,
    pub threads: usize,
    pub write_json: bool,
    pub columns: ReportColumns,
    pub subset: SubsetPaths,
    /// Cancellation hook for callers embedding the pipeline as a library.
    /// The binary never sets it; the driver checks it before each report.
    pub cancel: Arc<AtomicBool>,
    pub reports: Vec<Report>,
    pub rows_read: usize,
    pub skipped: usize,
    pub has_patients: bool,
    pub patterns: Option<Arc<PatternSet>>,
    pub models: Option<ModelStore>,
    pub cascades: Vec<Cascade>,
    pub run: Option<RunOutput>,
    pub cases: Option<CaseTable>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
}

impl Ctx {
    pub fn new(
        input: Option<PathBuf>,
        out_dir: PathBuf,
        models_dir: PathBuf,
        patterns_path: PathBuf,
        markers: Vec<Marker>,
    ) -> Self {
        Self {
            input,
            models_dir,
            patterns_path,
            markers,
            policy: KeywordPolicy::default(),
            threads: 0,
            write_json: false,
            columns: ReportColumns::default(),
            subset: SubsetPaths::default(),
            cancel: Arc::new(AtomicBool::new(false)),
            reports: Vec::new(),
            rows_read: 0,
            skipped: 0,
            has_patients: false,
            patterns: None,
            models: None,
            cascades: Vec::new(),
            run: None,
            cases: None,
            warnings: Vec::new(),
            output: OutputPaths::new(out_dir),
        }
    }
}
