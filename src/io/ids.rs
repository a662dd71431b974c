use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Whitespace-separated id list, as used for record/patient/case subsets.
pub fn read_id_list(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read id list {}", path.display()))?;
    Ok(content.split_whitespace().map(str::to_string).collect())
}
