use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::labels::{Label, Marker};
use crate::vectorize::{PatternSet, normalize_ascii};

/// How the keyword pre-filter takes part in the reported decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordPolicy {
    /// The reported classifier sees every report; the keyword signal reaches
    /// it through the mention features.
    #[default]
    Ensemble,
    /// Keyword-negative reports are NotReported without consulting the
    /// classifier.
    Gate,
}

impl std::fmt::Display for KeywordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeywordPolicy::Ensemble => "ensemble",
            KeywordPolicy::Gate => "gate",
        })
    }
}

#[derive(Debug, Clone)]
pub struct KeywordFilter {
    patterns: Arc<PatternSet>,
}

impl KeywordFilter {
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    pub fn filter(&self, text: &str, marker: Marker) -> Label {
        let text = normalize_ascii(text);
        if self
            .patterns
            .marker_rules(marker)
            .any(|rule| rule.mention.is_match(&text))
        {
            Label::Reported
        } else {
            Label::NotReported
        }
    }
}
