use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::cascade::Cascade;
use crate::ctx::Ctx;
use crate::model::ModelStore;
use crate::pipeline::Stage;
use crate::vectorize::{PatternSet, Vectorizer};

/// Loads patterns and every stage artifact for the selected markers, then
/// builds the cascades. Any problem here aborts before classification.
pub struct Stage2Models;

impl Stage2Models {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Models {
    fn name(&self) -> &'static str {
        "stage2_models"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let patterns = Arc::new(PatternSet::load(&ctx.patterns_path)?);
        let vectorizer = Arc::new(Vectorizer::new(patterns.clone())?);
        let store = ModelStore::load(&ctx.models_dir, &ctx.markers).with_context(|| {
            format!("failed to load models from {}", ctx.models_dir.display())
        })?;

        let mut cascades = Vec::with_capacity(ctx.markers.len());
        for &marker in &ctx.markers {
            let cascade = Cascade::new(marker, &store, vectorizer.clone(), ctx.policy)
                .with_context(|| format!("failed to build {} cascade", marker))?;
            cascades.push(cascade);
        }
        info!(
            markers = ctx.markers.len(),
            stages = store.len(),
            policy = %ctx.policy,
            "cascades_ready"
        );

        ctx.patterns = Some(patterns);
        ctx.models = Some(store);
        ctx.cascades = cascades;
        Ok(())
    }
}
