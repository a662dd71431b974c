use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;

use crate::labels::Marker;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatternFile {
    #[serde(default)]
    pub tests: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub sections: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

/// Replacement for a marker mention. `pre`/`post` are the boundary
/// characters around it, kept so line structure survives.
pub const MENTION_REPLACEMENT: &str = "${pre} TEST_INSTANCE ${post}";
pub const OTHER_TEST_REPLACEMENT: &str = "${pre} OTHER_TEST ${post}";

#[derive(Debug, Clone)]
pub struct TestRule {
    pub test: String,
    pub mention: Regex,
    /// Mention immediately followed by `+`.
    pub positive: Regex,
}

#[derive(Debug, Clone)]
pub struct SubRule {
    /// Expansion template for `Regex::replace_all`.
    pub replacement: String,
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct PatternSet {
    pub tests: Vec<TestRule>,
    pub sections: Vec<SubRule>,
    pub keywords: Vec<SubRule>,
}

impl PatternSet {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pattern file {}", path.display()))?;
        let file: PatternFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse pattern file {}", path.display()))?;
        Self::compile(&file).with_context(|| format!("invalid pattern file {}", path.display()))
    }

    pub fn compile(file: &PatternFile) -> Result<Self> {
        let mut tests = Vec::new();
        for (test, patterns) in &file.tests {
            let test = test.trim().to_ascii_uppercase();
            if test.is_empty() {
                bail!("empty test name");
            }
            for pattern in patterns {
                tests.push(TestRule {
                    test: test.clone(),
                    mention: compile_rule(&bounded("(?mi)", pattern))?,
                    positive: compile_rule(&format!(r"(?mi)(?:^|\W)(?:{})\s*\+", pattern))?,
                });
            }
        }

        let mut sections = Vec::new();
        for (replacement, patterns) in &file.sections {
            for pattern in patterns {
                sections.push(SubRule {
                    replacement: format!(" {} ", template_literal(replacement)),
                    regex: compile_rule(&format!(r"(?mi)^(?:{})$", pattern))?,
                });
            }
        }

        let mut keywords = Vec::new();
        for (replacement, patterns) in &file.keywords {
            for pattern in patterns {
                keywords.push(SubRule {
                    replacement: format!("${{pre}} {} ${{post}}", template_literal(replacement)),
                    regex: compile_rule(&bounded("(?m)", pattern))?,
                });
            }
        }

        Ok(Self {
            tests,
            sections,
            keywords,
        })
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.tests.iter().any(|t| marker.matches_name(&t.test))
    }

    pub fn marker_rules(&self, marker: Marker) -> impl Iterator<Item = &TestRule> {
        self.tests.iter().filter(move |t| marker.matches_name(&t.test))
    }

    pub fn other_rules(&self, marker: Marker) -> impl Iterator<Item = &TestRule> {
        self.tests.iter().filter(move |t| !marker.matches_name(&t.test))
    }
}

// `pre`/`post` capture the boundary characters so replacements can keep them.
fn bounded(flags: &str, pattern: &str) -> String {
    format!(r"{}(?P<pre>^|\W)(?:{})(?P<post>\W|$)", flags, pattern)
}

fn compile_rule(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("pattern failed to compile: {}", pattern))
}

// Labels are literal text inside an expansion template.
fn template_literal(s: &str) -> String {
    s.replace("<newline>", "\n").replace('$', "$$")
}
