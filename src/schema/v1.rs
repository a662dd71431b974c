use serde::Serialize;

use crate::cascade::{ClassificationRecord, KeywordPolicy, RunSummary};

pub const TOOL: &str = "kira-gentest";
pub const SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub schema_version: String,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: TOOL.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: Option<String>,
    pub rows: usize,
    pub reports: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryV1 {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub keyword_policy: KeywordPolicy,
    pub cancelled: bool,
    pub markers: Vec<RunSummary>,
    pub cases: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordsV1<'a> {
    pub tool: ToolMeta,
    pub keyword_policy: KeywordPolicy,
    pub records: &'a [ClassificationRecord],
}
