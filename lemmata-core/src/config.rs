//! Pipeline configuration.

use std::path::PathBuf;
use std::thread;

/// What the batch runner does when one text fails to annotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the batch and fail with the lowest failing index.
    #[default]
    Abort,
    /// Leave the failed text empty, log it and keep going.
    Isolate,
}

/// What partitioning does with a `pro_or_con` value other than `pro`/`con`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownLabelPolicy {
    /// Leave the record out of both outputs and count it.
    #[default]
    Drop,
    /// Fail the run.
    Reject,
}

/// General stop list unioned with the curated review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopList {
    /// The classic 318-word English list.
    #[default]
    English,
    /// NLTK's English list.
    Nltk,
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding the input and output record sets.
    /// Default: `data`
    pub data_dir: PathBuf,
    /// Key of the input record set. Default: `ratings_df_all`
    pub input_key: String,
    /// Key the `pro` subset is saved under. Default: `pros_df`
    pub pro_key: String,
    /// Key the `con` subset is saved under. Default: `cons_df`
    pub con_key: String,
    /// Worker pool size. `None` uses available parallelism minus one.
    pub workers: Option<usize>,
    pub failure_policy: FailurePolicy,
    pub unknown_labels: UnknownLabelPolicy,
    pub stop_list: StopList,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            input_key: "ratings_df_all".to_owned(),
            pro_key: "pros_df".to_owned(),
            con_key: "cons_df".to_owned(),
            workers: None,
            failure_policy: FailurePolicy::Abort,
            unknown_labels: UnknownLabelPolicy::Drop,
            stop_list: StopList::English,
        }
    }
}

impl PipelineConfig {
    /// Default keys under a different data directory.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

/// Available hardware parallelism, or 1 when it cannot be determined.
pub fn available_parallelism() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

/// Resolves the worker pool size.
///
/// An explicit count is used as given (at least 1). Otherwise one core is
/// left for the caller: `max(1, available_parallelism - 1)`.
pub fn worker_count(explicit: Option<usize>) -> usize {
    match explicit {
        Some(n) => n.max(1),
        None => available_parallelism().saturating_sub(1).max(1),
    }
}
