use std::collections::{BTreeMap, HashMap};

use crate::cascade::ClassificationRecord;
use crate::input::Report;
use crate::labels::{Label, Marker, StageKind};

pub const NO_RECORD: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStatus {
    pub result: Label,
    pub record_id: Option<String>,
}

impl Default for CaseStatus {
    fn default() -> Self {
        Self {
            result: Label::Unknown,
            record_id: None,
        }
    }
}

impl CaseStatus {
    pub fn record_display(&self) -> &str {
        self.record_id.as_deref().unwrap_or(NO_RECORD)
    }

    fn rank(label: Label) -> u8 {
        match label {
            Label::Positive => 2,
            Label::Negative => 1,
            _ => 0,
        }
    }

    // Higher status wins; equal status keeps the smaller record id so the
    // result does not depend on record order.
    fn offer(&mut self, result: Label, record_id: &str) {
        let new_rank = Self::rank(result);
        let cur_rank = Self::rank(self.result);
        let replace = new_rank > cur_rank
            || (new_rank == cur_rank
                && new_rank > 0
                && self.record_id.as_deref().is_none_or(|cur| record_id < cur));
        if replace {
            self.result = result;
            self.record_id = Some(record_id.to_string());
        }
    }
}

/// Case id -> marker -> status, ordered by case id.
#[derive(Debug, Clone, Default)]
pub struct CaseTable {
    pub markers: Vec<Marker>,
    pub cases: BTreeMap<String, BTreeMap<Marker, CaseStatus>>,
}

impl CaseTable {
    pub fn get(&self, case_id: &str, marker: Marker) -> Option<&CaseStatus> {
        self.cases.get(case_id)?.get(&marker)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Only Reported records contribute; for EGFR the method must also be
/// mutational analysis.
fn contributes(record: &ClassificationRecord) -> Option<Label> {
    let result = record.label(StageKind::Positive)?;
    if record.label(StageKind::Reported) != Some(Label::Reported) {
        return None;
    }
    if record.marker == Marker::Egfr
        && record.label(StageKind::Method) != Some(Label::MutationalAnalysis)
    {
        return None;
    }
    Some(result)
}

pub fn resolve_cases(
    reports: &[Report],
    records: &[ClassificationRecord],
    markers: &[Marker],
) -> CaseTable {
    let case_of: HashMap<&str, String> = reports
        .iter()
        .filter_map(|r| r.case_id().map(|c| (r.id.as_str(), c)))
        .collect();

    let mut table = CaseTable {
        markers: markers.to_vec(),
        cases: BTreeMap::new(),
    };
    for case in case_of.values() {
        let entry = table.cases.entry(case.clone()).or_default();
        for &marker in markers {
            entry.entry(marker).or_default();
        }
    }

    for record in records {
        let Some(case) = case_of.get(record.report_id.as_str()) else {
            continue;
        };
        let Some(result) = contributes(record) else {
            continue;
        };
        if let Some(status) = table
            .cases
            .get_mut(case)
            .and_then(|m| m.get_mut(&record.marker))
        {
            status.offer(result, &record.report_id);
        }
    }
    table
}
