use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::vectorize::{FeatureVector, ReportFeatures};

/// Feature-name to vector-index schema for one (marker, stage) model.
#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    index: HashMap<String, usize>,
    size: usize,
}

impl FeatureMap {
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut map = Self::default();
        for (name, idx) in pairs {
            map.insert(name.into(), idx)?;
        }
        Ok(map)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feature map {}", path.display()))?;
        parse_feature_map(&content, &path.display().to_string())
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Features missing from the map are dropped; map entries missing from
    /// the report stay zero.
    pub fn project(&self, features: &ReportFeatures) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.size);
        let values = vector.values_mut();
        for (name, value) in features.iter() {
            if let Some(idx) = self.lookup(name) {
                values[idx] = value;
            }
        }
        vector
    }

    fn insert(&mut self, name: String, idx: usize) -> Result<()> {
        if self.index.contains_key(&name) {
            bail!("duplicate feature '{}'", name);
        }
        let Some(end) = idx.checked_add(1) else {
            bail!("feature index {} too large for '{}'", idx, name);
        };
        self.size = self.size.max(end);
        self.index.insert(name, idx);
        Ok(())
    }
}

fn parse_feature_map(content: &str, source: &str) -> Result<FeatureMap> {
    let mut map = FeatureMap::default();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 2 {
            bail!(
                "{}:{} malformed feature line (expected '<name> <index>')",
                source,
                line_no
            );
        }
        let index: usize = parts[1]
            .parse()
            .with_context(|| format!("{}:{} invalid feature index '{}'", source, line_no, parts[1]))?;
        map.insert(parts[0].to_string(), index)
            .with_context(|| format!("{}:{}", source, line_no))?;
    }
    Ok(map)
}
