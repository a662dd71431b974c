use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::{InputMeta, RecordsV1, SummaryV1, ToolMeta};

pub fn build_summary(ctx: &Ctx) -> Result<SummaryV1> {
    let run = ctx.run.as_ref().context("classification results missing")?;
    Ok(SummaryV1 {
        tool: ToolMeta::current(),
        input: InputMeta {
            path: ctx.input.as_ref().map(|p| p.display().to_string()),
            rows: ctx.rows_read,
            reports: ctx.reports.len(),
            skipped: ctx.skipped,
        },
        keyword_policy: ctx.policy,
        cancelled: run.cancelled,
        markers: run.summaries.clone(),
        cases: ctx.cases.as_ref().map(|c| c.len()),
    })
}

pub fn build_records(ctx: &Ctx) -> Result<RecordsV1<'_>> {
    let run = ctx.run.as_ref().context("classification results missing")?;
    Ok(RecordsV1 {
        tool: ToolMeta::current(),
        keyword_policy: ctx.policy,
        records: &run.records,
    })
}
