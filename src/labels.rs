use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Marker {
    #[serde(rename = "EGFR")]
    Egfr,
    #[serde(rename = "ALK")]
    Alk,
}

impl Marker {
    pub const ALL: [Marker; 2] = [Marker::Egfr, Marker::Alk];

    pub fn name(self) -> &'static str {
        match self {
            Marker::Egfr => "EGFR",
            Marker::Alk => "ALK",
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Marker::Egfr => "egfr",
            Marker::Alk => "alk",
        }
    }

    /// Method label counted as the affirmative class on the method axis.
    pub fn standard_method(self) -> Label {
        match self {
            Marker::Egfr => Label::MutationalAnalysis,
            Marker::Alk => Label::Fish,
        }
    }

    pub fn matches_name(self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Reported,
    Insufficient,
    Positive,
    Method,
}

impl StageKind {
    pub const ALL: [StageKind; 4] = [
        StageKind::Reported,
        StageKind::Insufficient,
        StageKind::Positive,
        StageKind::Method,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StageKind::Reported => "reported",
            StageKind::Insufficient => "insufficient",
            StageKind::Positive => "positive",
            StageKind::Method => "method",
        }
    }

    /// `(affirmative, negative)` label pair; a margin >= 0 selects the first.
    pub fn labels(self, marker: Marker) -> (Label, Label) {
        match self {
            StageKind::Reported => (Label::Reported, Label::NotReported),
            StageKind::Insufficient => (Label::Insufficient, Label::Unknown),
            StageKind::Positive => (Label::Positive, Label::Negative),
            StageKind::Method => (marker.standard_method(), Label::Other),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Reported")]
    Reported,
    #[serde(rename = "Not Reported")]
    NotReported,
    #[serde(rename = "Insufficient")]
    Insufficient,
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Mutational Analysis")]
    MutationalAnalysis,
    #[serde(rename = "FISH")]
    Fish,
    #[serde(rename = "OTHER")]
    Other,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Reported => "Reported",
            Label::NotReported => "Not Reported",
            Label::Insufficient => "Insufficient",
            Label::Unknown => "Unknown",
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::MutationalAnalysis => "Mutational Analysis",
            Label::Fish => "FISH",
            Label::Other => "OTHER",
        }
    }

    pub fn stage(self) -> StageKind {
        match self {
            Label::Reported | Label::NotReported => StageKind::Reported,
            Label::Insufficient | Label::Unknown => StageKind::Insufficient,
            Label::Positive | Label::Negative => StageKind::Positive,
            Label::MutationalAnalysis | Label::Fish | Label::Other => StageKind::Method,
        }
    }

    /// Whether this label is the class scored as "positive" on its axis
    /// for the given marker. A non-standard method is never affirmative.
    pub fn is_affirmative(self, marker: Marker) -> bool {
        self.stage().labels(marker).0 == self
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
