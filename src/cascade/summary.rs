use std::collections::BTreeMap;

use serde::Serialize;

use crate::cascade::{ClassificationRecord, DecidedBy};
use crate::labels::{Label, Marker, StageKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub marker: Marker,
    pub total: usize,
    pub failures: usize,
    pub keyword_decided: usize,
    pub labels: BTreeMap<Label, usize>,
    /// Counts per full path, e.g. `Reported/Positive/FISH`.
    pub terminal: BTreeMap<String, usize>,
}

impl RunSummary {
    pub fn from_records(marker: Marker, records: &[ClassificationRecord]) -> Self {
        let mut summary = Self {
            marker,
            total: 0,
            failures: 0,
            keyword_decided: 0,
            labels: BTreeMap::new(),
            terminal: BTreeMap::new(),
        };
        for record in records.iter().filter(|r| r.marker == marker) {
            summary.total += 1;
            *summary.terminal.entry(record.final_label()).or_insert(0) += 1;
            let Some(branch) = record.branch() else {
                summary.failures += 1;
                continue;
            };
            for result in branch.results() {
                *summary.labels.entry(result.label).or_insert(0) += 1;
                if result.decided_by == DecidedBy::Keyword {
                    summary.keyword_decided += 1;
                }
            }
        }
        summary
    }

    pub fn count(&self, label: Label) -> usize {
        self.labels.get(&label).copied().unwrap_or(0)
    }

    /// Records landing on the affirmative class of `stage`.
    pub fn affirmative(&self, stage: StageKind) -> usize {
        self.count(stage.labels(self.marker).0)
    }
}
