use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{self, json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let run = ctx.run.as_ref().context("classification results missing")?;
        tsv_writer::write_records_tsv(&ctx.output.records_tsv, &ctx.reports, &run.records)?;
        if let Some(cases) = &ctx.cases {
            tsv_writer::write_cases_tsv(&ctx.output.cases_tsv, cases)?;
        }
        if ctx.write_json {
            let records = json_writer::build_records(ctx)?;
            io::write_json(&ctx.output.records_json, &records)?;
        }
        let summary = json_writer::build_summary(ctx)?;
        io::write_json(&ctx.output.summary_json, &summary)?;

        info!(out_dir = %ctx.output.out_dir.display(), "stage5_output_ready");
        Ok(())
    }
}
