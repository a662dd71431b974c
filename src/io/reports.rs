use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::input::{Report, Subset};
use crate::io::open_maybe_gz;

pub const DEFAULT_ID_COLUMN: &str = "source_id";
pub const DEFAULT_TEXT_COLUMN: &str = "full_path_text";
pub const ACCESSION_COLUMN: &str = "accession_number_hosp";
pub const PATIENT_COLUMN: &str = "patient_id";
pub const TUMOR_COLUMN: &str = "tumor_record";

#[derive(Debug, Clone)]
pub struct ReportColumns {
    pub id: String,
    pub text: String,
}

impl Default for ReportColumns {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID_COLUMN.to_string(),
            text: DEFAULT_TEXT_COLUMN.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ReportTable {
    pub reports: Vec<Report>,
    pub rows_read: usize,
    pub skipped: usize,
    pub has_patients: bool,
}

pub fn read_reports(path: &Path, columns: &ReportColumns, subset: &Subset) -> Result<ReportTable> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open report file {}", path.display()))?;
    let mut reader = BufReader::new(reader);

    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        bail!("{} is empty (header row required)", path.display());
    }
    let headers: Vec<String> = split_row(&buf).into_iter().map(|h| h.trim().to_string()).collect();

    let id_idx = column_index(&headers, &columns.id, path)?;
    let text_idx = column_index(&headers, &columns.text, path)?;
    let accession_idx = headers.iter().position(|h| h == ACCESSION_COLUMN);
    let patient_idx = headers.iter().position(|h| h == PATIENT_COLUMN);
    let tumor_idx = headers.iter().position(|h| h == TUMOR_COLUMN);

    let mut reports = Vec::new();
    let mut rows_read = 0usize;
    let mut skipped = 0usize;
    let mut line_no = 1usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if buf.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }
        let fields = split_row(&buf);
        if fields.len() != headers.len() {
            bail!(
                "{}:{} differing row length ({} fields, header has {})",
                path.display(),
                line_no,
                fields.len(),
                headers.len()
            );
        }
        rows_read += 1;

        let optional = |idx: Option<usize>| {
            idx.map(|i| fields[i].trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let report = Report {
            id: fields[id_idx].trim().to_string(),
            text: fields[text_idx].clone(),
            accession: optional(accession_idx),
            patient: optional(patient_idx),
            tumor: optional(tumor_idx),
        };
        if report.id.is_empty() {
            bail!("{}:{} empty report id", path.display(), line_no);
        }
        if !subset.keeps(&report) {
            skipped += 1;
            continue;
        }
        reports.push(report);
    }

    Ok(ReportTable {
        reports,
        rows_read,
        skipped,
        has_patients: patient_idx.is_some(),
    })
}

fn column_index(headers: &[String], name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("data field '{}' not found in {}", name, path.display()))
}

// Fields are decoded lossily so binary report bodies surface later as
// per-report failures rather than aborting the whole read.
fn split_row(line: &[u8]) -> Vec<String> {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
        end -= 1;
    }
    line[..end]
        .split(|b| *b == b'\t')
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .collect()
}
