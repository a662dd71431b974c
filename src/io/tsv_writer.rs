use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cascade::{CaseTable, ClassificationRecord, Outcome};
use crate::input::Report;
use crate::labels::StageKind;

pub const RECORDS_HEADER: &str = "report_id\taccession_number_hosp\tpatient_id\ttumor_record\t\
test_type\toutcome\treported\tinsufficient\tpositive\tmethod\terror";

/// One row per record. Accession, patient and tumor come from the report
/// with the record's id and are empty when the input lacks them.
pub fn write_records_tsv(
    path: &Path,
    reports: &[Report],
    records: &[ClassificationRecord],
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let mut by_id: HashMap<&str, &Report> = HashMap::with_capacity(reports.len());
    for report in reports {
        by_id.entry(report.id.as_str()).or_insert(report);
    }

    writeln!(w, "{}", RECORDS_HEADER)?;
    for record in records {
        let (accession, patient, tumor) = match by_id.get(record.report_id.as_str()) {
            Some(report) => (
                optional_field(&report.accession),
                optional_field(&report.patient),
                optional_field(&report.tumor),
            ),
            None => Default::default(),
        };
        let label = |stage: StageKind| {
            record
                .label(stage)
                .map(|l| l.as_str())
                .unwrap_or_default()
        };
        let (outcome, error) = match &record.outcome {
            Outcome::Classified(_) => ("classified", String::new()),
            Outcome::Failed { reason } => ("failed", clean_field(reason)),
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            clean_field(&record.report_id),
            accession,
            patient,
            tumor,
            record.marker,
            outcome,
            label(StageKind::Reported),
            label(StageKind::Insufficient),
            label(StageKind::Positive),
            label(StageKind::Method),
            error
        )?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_cases_tsv(path: &Path, table: &CaseTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let mut header = vec!["case_id".to_string()];
    for marker in &table.markers {
        header.push(format!("{} result", marker));
        header.push(format!("{} record_id", marker));
    }
    writeln!(w, "{}", header.join("\t"))?;

    for (case_id, statuses) in &table.cases {
        let mut row = vec![clean_field(case_id)];
        for marker in &table.markers {
            let status = statuses.get(marker).cloned().unwrap_or_default();
            row.push(status.result.as_str().to_string());
            row.push(clean_field(status.record_display()));
        }
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()?;
    Ok(())
}

fn optional_field(value: &Option<String>) -> String {
    value.as_deref().map(clean_field).unwrap_or_default()
}

// Tabs and newlines would break the row layout.
fn clean_field(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
