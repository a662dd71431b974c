use anyhow::{Result, bail};
use tracing::info;

use crate::cascade::Driver;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage3Classify;

impl Stage3Classify {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Classify {
    fn name(&self) -> &'static str {
        "stage3_classify"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.cascades.is_empty() {
            bail!("no cascades built; models must be loaded first");
        }
        let driver = Driver::new(ctx.cascades.clone())
            .with_threads(ctx.threads)
            .with_cancel(ctx.cancel.clone());
        let run = driver.run(&ctx.reports)?;
        info!(
            records = run.records.len(),
            cancelled = run.cancelled,
            "classification_done"
        );
        if run.cancelled {
            ctx.warnings
                .push("run cancelled; outputs cover processed reports only".to_string());
        }
        ctx.run = Some(run);
        Ok(())
    }
}
