use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

#[cfg(feature = "mt")]
use rayon::prelude::*;

use crate::cascade::{Cascade, ClassificationRecord, Outcome, RunSummary};
use crate::error::CascadeError;
use crate::input::Report;
use crate::labels::{Label, Marker};

#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Report-major, then marker order as configured on the driver.
    pub records: Vec<ClassificationRecord>,
    pub summaries: Vec<RunSummary>,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct Driver {
    cascades: Vec<Cascade>,
    threads: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl Driver {
    pub fn new(cascades: Vec<Cascade>) -> Self {
        Self {
            cascades,
            threads: 0,
            cancel: None,
        }
    }

    /// 0 lets the pool pick.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.cascades.iter().map(|c| c.marker()).collect()
    }

    pub fn run(&self, reports: &[Report]) -> Result<RunOutput, CascadeError> {
        let per_report = self.classify_all(reports)?;

        let mut cancelled = false;
        let mut records = Vec::with_capacity(reports.len() * self.cascades.len());
        for item in per_report {
            match item {
                Some(batch) => records.extend(batch),
                None => cancelled = true,
            }
        }
        if cancelled {
            warn!(
                processed = records.len() / self.cascades.len().max(1),
                total = reports.len(),
                "run cancelled between reports"
            );
        }

        let summaries: Vec<RunSummary> = self
            .markers()
            .into_iter()
            .map(|marker| RunSummary::from_records(marker, &records))
            .collect();
        for summary in &summaries {
            info!(
                marker = %summary.marker,
                total = summary.total,
                reported = summary.count(Label::Reported),
                failures = summary.failures,
                "marker_classified"
            );
        }

        Ok(RunOutput {
            records,
            summaries,
            cancelled,
        })
    }

    /// All markers for one report; `None` when the run was cancelled before
    /// this report started.
    fn classify_report(
        &self,
        report: &Report,
    ) -> Result<Option<Vec<ClassificationRecord>>, CascadeError> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Ok(None);
            }
        }
        let mut out = Vec::with_capacity(self.cascades.len());
        for cascade in &self.cascades {
            let record = cascade.classify(report)?;
            if let Outcome::Failed { reason } = &record.outcome {
                warn!(report = %report.id, marker = %cascade.marker(), reason = %reason, "report_failed");
            }
            out.push(record);
        }
        Ok(Some(out))
    }

    #[cfg(feature = "mt")]
    fn classify_all(
        &self,
        reports: &[Report],
    ) -> Result<Vec<Option<Vec<ClassificationRecord>>>, CascadeError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| CascadeError::ThreadPool(e.to_string()))?;
        pool.install(|| {
            reports
                .par_iter()
                .map(|report| self.classify_report(report))
                .collect()
        })
    }

    #[cfg(not(feature = "mt"))]
    fn classify_all(
        &self,
        reports: &[Report],
    ) -> Result<Vec<Option<Vec<ClassificationRecord>>>, CascadeError> {
        let _ = self.threads;
        reports
            .iter()
            .map(|report| self.classify_report(report))
            .collect()
    }
}
