use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::labels::StageKind;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let run = ctx.run.as_ref().context("classification results missing")?;

    let mut out = String::new();
    out.push_str(&format!("kira-gentest v{}\n", version));
    out.push_str(&format!(
        "Input: {} reports ({} rows, {} skipped), policy={}\n",
        ctx.reports.len(),
        ctx.rows_read,
        ctx.skipped,
        ctx.policy
    ));
    for summary in &run.summaries {
        let mut counts = Vec::new();
        for stage in StageKind::ALL {
            let (yes, no) = stage.labels(summary.marker);
            counts.push(format!("{}={}", yes, summary.count(yes)));
            counts.push(format!("{}={}", no, summary.count(no)));
        }
        out.push_str(&format!(
            "{}: {} records, failures={}\n  {}\n",
            summary.marker,
            summary.total,
            summary.failures,
            counts.join(", ")
        ));
    }
    if let Some(cases) = &ctx.cases {
        out.push_str(&format!("Cases: {}\n", cases.len()));
    }
    if run.cancelled {
        out.push_str("Run cancelled before all reports were processed\n");
    }
    Ok(out)
}
