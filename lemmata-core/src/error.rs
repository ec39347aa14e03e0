//! Pipeline-level errors.

use thiserror::Error;

use crate::records::StoreError;
use crate::runner::BatchError;

/// Error type for a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load record set: {0}")]
    Load(#[source] StoreError),
    #[error("record {index}: field '{field}' is missing or not a string")]
    Schema { index: usize, field: &'static str },
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("record {index}: unknown pro_or_con value {value}")]
    UnknownLabel { index: usize, value: String },
    #[error("failed to save record set: {0}")]
    Save(#[source] StoreError),
}
