pub mod ngrams;
mod normalize;
pub mod patterns;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};

use crate::error::ReportError;
use crate::input::Report;
use crate::labels::Marker;
use crate::model::FeatureMap;

pub use normalize::{check_well_formed, normalize_ascii};
use patterns::{MENTION_REPLACEMENT, OTHER_TEST_REPLACEMENT};
pub use patterns::{PatternFile, PatternSet};

pub const TEST_INSTANCE: &str = "TEST_INSTANCE";
pub const NO_KEYWORD: &str = "NO_KEYWORD_IN_TEXT";
pub const MENTION_COUNT: &str = "COUNT_TEST_INSTANCE";

/// Named features of one report for one marker. Presence features hold 1.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFeatures {
    values: BTreeMap<String, f32>,
}

impl ReportFeatures {
    pub fn mark(&mut self, name: &str) {
        self.values.insert(name.to_string(), 1.0);
    }

    pub fn set(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}

#[derive(Debug, Clone)]
pub struct Vectorizer {
    patterns: Arc<PatternSet>,
    cytology: Regex,
    insufficient: Regex,
    accession: Regex,
    substitutions: Vec<(Regex, String)>,
    stop_list: Regex,
}

impl Vectorizer {
    pub fn new(patterns: Arc<PatternSet>) -> Result<Self> {
        Ok(Self {
            patterns,
            cytology: Regex::new(r"(?i)cytoprep|cytolog").context("cytology pattern")?,
            insufficient: Regex::new(
                r"(?i)insufficient (?:tumor|sample)?|technical diffic|(?:tumor|sample) insufficient",
            )
            .context("insufficient pattern")?,
            accession: Regex::new(
                r"\W([(]?[A-Z]{1,2}[\- ]?[0-9]{2,4}[\- ]{1,3}[0-9]{2,8}[)]?)\W",
            )
            .context("accession pattern")?,
            substitutions: normalize::substitution_table()?,
            stop_list: normalize::stop_list()?,
        })
    }

    pub fn patterns(&self) -> &Arc<PatternSet> {
        &self.patterns
    }

    /// Extraction followed by projection onto the stage's schema. Empty text
    /// gives an all-zero vector.
    pub fn vectorize(
        &self,
        report: &Report,
        marker: Marker,
        map: &FeatureMap,
    ) -> Result<FeatureVector, ReportError> {
        let features = self.extract(report, marker)?;
        Ok(map.project(&features))
    }

    pub fn extract(&self, report: &Report, marker: Marker) -> Result<ReportFeatures, ReportError> {
        check_well_formed(&report.text)?;
        let mut features = ReportFeatures::default();
        let mut text = normalize_ascii(&report.text);
        if text.trim().is_empty() {
            return Ok(features);
        }

        if self.cytology.is_match(&text) {
            features.mark("CYTO_RELATED_REPORT");
        }
        if self
            .patterns
            .marker_rules(marker)
            .any(|rule| rule.positive.is_match(&text))
        {
            features.mark("post_window=POSITIVE");
            features.mark("post_window=TEST_INSTANCE_POSITIVE");
        }

        // A boundary character ends one match and cannot start the next, so
        // adjacent mentions need a second pass.
        for _ in 0..2 {
            for rule in self.patterns.marker_rules(marker) {
                text = expand(&rule.mention, &text, MENTION_REPLACEMENT);
            }
        }
        for _ in 0..2 {
            for rule in self.patterns.other_rules(marker) {
                text = expand(&rule.mention, &text, OTHER_TEST_REPLACEMENT);
            }
            for rule in &self.patterns.sections {
                text = expand(&rule.regex, &text, &rule.replacement);
            }
            for rule in &self.patterns.keywords {
                text = expand(&rule.regex, &text, &rule.replacement);
            }
        }

        text = self.mark_accessions(&text, report.accession.as_deref(), &mut features);
        if self.insufficient.is_match(&text) {
            features.mark("INSUFFICIENT");
        }
        for (regex, replacement) in &self.substitutions {
            text = replace(regex, &text, replacement);
        }

        text = text.to_ascii_uppercase();
        for _ in 0..2 {
            text = replace(&self.stop_list, &text, " ");
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        ngrams::window_features(&tokens, marker, &mut features);

        let mentions = tokens.iter().filter(|t| **t == TEST_INSTANCE).count();
        if mentions == 0 {
            features.mark(NO_KEYWORD);
        } else {
            features.set(MENTION_COUNT, mentions as f32);
        }
        Ok(features)
    }

    fn mark_accessions(
        &self,
        text: &str,
        own: Option<&str>,
        features: &mut ReportFeatures,
    ) -> String {
        let own = own.map(strip_accession);
        let found: Vec<String> = self
            .accession
            .captures_iter(text)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect();

        let mut out = text.to_string();
        let mut other = false;
        for raw in found {
            let replacement = if own.as_deref() == Some(strip_accession(&raw).as_str()) {
                " THIS_ACC_NUM "
            } else {
                other = true;
                " OTHER_ACC_NUM "
            };
            out = out.replace(&raw, replacement);
        }
        if other {
            features.mark("OTHER_ACC_NUM_IN_TEXT");
        }
        out
    }
}

fn strip_accession(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '(' | ')' | '-' | ' '))
        .collect()
}

fn replace(regex: &Regex, text: &str, with: &str) -> String {
    regex.replace_all(text, NoExpand(with)).into_owned()
}

fn expand(regex: &Regex, text: &str, template: &str) -> String {
    regex.replace_all(text, template).into_owned()
}
