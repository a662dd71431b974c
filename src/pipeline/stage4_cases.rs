use anyhow::{Context, Result};
use tracing::info;

use crate::cascade::resolve_cases;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage4Cases;

impl Stage4Cases {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Cases {
    fn name(&self) -> &'static str {
        "stage4_cases"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if !ctx.has_patients {
            info!("no patient column; case resolution skipped");
            return Ok(());
        }
        let run = ctx.run.as_ref().context("classification results missing")?;
        let table = resolve_cases(&ctx.reports, &run.records, &ctx.markers);
        info!(cases = table.len(), "cases_resolved");
        ctx.cases = Some(table);
        Ok(())
    }
}
