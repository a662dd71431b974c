use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::input::Subset;
use crate::io::{ids, reports};
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(input) = ctx.input.clone() else {
            return Ok(());
        };

        let subset = Subset {
            records: load_ids(ctx.subset.records.as_deref())?,
            patients: load_ids(ctx.subset.patients.as_deref())?,
            skip_cases: load_ids(ctx.subset.skip_cases.as_deref())?,
        };

        let table = reports::read_reports(&input, &ctx.columns, &subset)?;
        info!(
            input = %input.display(),
            rows = table.rows_read,
            reports = table.reports.len(),
            skipped = table.skipped,
            "reports_loaded"
        );

        if !subset.is_empty() && table.reports.is_empty() && table.rows_read > 0 {
            warn!("subset filters removed every report");
            ctx.warnings
                .push("subset filters removed every report".to_string());
        }
        if (subset.patients.is_some() || subset.skip_cases.is_some()) && !table.has_patients {
            ctx.warnings.push(format!(
                "patient subset given but {} has no {} column",
                input.display(),
                reports::PATIENT_COLUMN
            ));
        }

        ctx.rows_read = table.rows_read;
        ctx.skipped = table.skipped;
        ctx.has_patients = table.has_patients;
        ctx.reports = table.reports;
        Ok(())
    }
}

fn load_ids(path: Option<&Path>) -> Result<Option<HashSet<String>>> {
    path.map(ids::read_id_list).transpose()
}
