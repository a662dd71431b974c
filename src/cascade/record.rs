use serde::{Deserialize, Serialize};

use crate::labels::{Label, Marker, StageKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecidedBy {
    Classifier,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: StageKind,
    pub label: Label,
    /// Logistic of the margin toward the chosen label, in `[0.5, 1.0]`.
    pub confidence: f64,
    pub margin: f64,
    pub decided_by: DecidedBy,
}

impl StageResult {
    pub fn from_margin(stage: StageKind, marker: Marker, margin: f64) -> Self {
        let (yes, no) = stage.labels(marker);
        let p = 1.0 / (1.0 + (-margin).exp());
        let (label, confidence) = if margin >= 0.0 { (yes, p) } else { (no, 1.0 - p) };
        Self {
            stage,
            label,
            confidence,
            margin,
            decided_by: DecidedBy::Classifier,
        }
    }

    pub fn keyword(stage: StageKind, label: Label) -> Self {
        Self {
            stage,
            label,
            confidence: 1.0,
            margin: 0.0,
            decided_by: DecidedBy::Keyword,
        }
    }
}

/// Terminal path of the cascade. The two variants are the only shapes a
/// classified record can take, so insufficient and positive/method results
/// never coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum Branch {
    NotReported {
        reported: StageResult,
        insufficient: StageResult,
    },
    Reported {
        reported: StageResult,
        positive: StageResult,
        method: StageResult,
    },
}

impl Branch {
    pub fn reported(&self) -> &StageResult {
        match self {
            Branch::NotReported { reported, .. } | Branch::Reported { reported, .. } => reported,
        }
    }

    pub fn insufficient(&self) -> Option<&StageResult> {
        match self {
            Branch::NotReported { insufficient, .. } => Some(insufficient),
            Branch::Reported { .. } => None,
        }
    }

    pub fn positive(&self) -> Option<&StageResult> {
        match self {
            Branch::Reported { positive, .. } => Some(positive),
            Branch::NotReported { .. } => None,
        }
    }

    pub fn method(&self) -> Option<&StageResult> {
        match self {
            Branch::Reported { method, .. } => Some(method),
            Branch::NotReported { .. } => None,
        }
    }

    pub fn results(&self) -> Vec<&StageResult> {
        match self {
            Branch::NotReported {
                reported,
                insufficient,
            } => vec![reported, insufficient],
            Branch::Reported {
                reported,
                positive,
                method,
            } => vec![reported, positive, method],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome {
    Classified(Branch),
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub report_id: String,
    pub marker: Marker,
    pub outcome: Outcome,
}

impl ClassificationRecord {
    pub fn branch(&self) -> Option<&Branch> {
        match &self.outcome {
            Outcome::Classified(branch) => Some(branch),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    pub fn label(&self, stage: StageKind) -> Option<Label> {
        let branch = self.branch()?;
        let result = match stage {
            StageKind::Reported => Some(branch.reported()),
            StageKind::Insufficient => branch.insufficient(),
            StageKind::Positive => branch.positive(),
            StageKind::Method => branch.method(),
        };
        result.map(|r| r.label)
    }

    /// Slash-joined labels along the path taken, e.g.
    /// `Reported/Negative/Mutational Analysis`.
    pub fn final_label(&self) -> String {
        match &self.outcome {
            Outcome::Classified(branch) => branch
                .results()
                .iter()
                .map(|r| r.label.as_str())
                .collect::<Vec<_>>()
                .join("/"),
            Outcome::Failed { .. } => "failed".to_string(),
        }
    }
}
