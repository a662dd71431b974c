use thiserror::Error;

use crate::labels::{Marker, StageKind};

/// Fatal configuration problems. Any of these aborts the run for the
/// affected marker before (or at) the first report that would need it.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("{marker}/{stage}: no model loaded for this stage")]
    MissingStage { marker: Marker, stage: StageKind },

    #[error("{marker}/{stage}: feature vector length {got} does not match model input size {expected}")]
    LengthMismatch {
        marker: Marker,
        stage: StageKind,
        expected: usize,
        got: usize,
    },

    #[error("{marker}/{stage}: {message}")]
    Config {
        marker: Marker,
        stage: StageKind,
        message: String,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Problems confined to a single report; the driver records them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("malformed report text: {reason}")]
    Malformed { reason: String },
}
