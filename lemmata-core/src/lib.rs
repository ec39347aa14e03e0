//! Review lemmatization.
//!
//! Loads a set of review records, reduces each `review_text` to its content
//! lemmas and splits the records into `pro` and `con` sets.
//!
//! ```no_run
//! use lemmata_core::{pipeline, PipelineConfig};
//!
//! let summary = pipeline::run(&PipelineConfig::default())?;
//! println!("{summary}");
//! # Ok::<(), lemmata_core::PipelineError>(())
//! ```
//!
//! The pieces are usable on their own:
//!
//! - [`analyzer`]: normalizer, tokenizer, tagger, lemmatizer and the
//!   [`Annotator`](analyzer::Annotator) seam
//! - [`LemmaFilter`]: one text → space-joined content lemmas
//! - [`BatchRunner`]: the filter over a batch on a worker pool, in order
//! - [`RecordSet`] and [`RecordStore`]: records, partitioning and storage

pub mod analyzer;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod records;
pub mod runner;
pub mod stopwords;

pub use config::{FailurePolicy, PipelineConfig, StopList, UnknownLabelPolicy};
pub use error::PipelineError;
pub use filter::{LemmaCorrection, LemmaFilter};
pub use pipeline::RunSummary;
pub use records::{Partition, RecordSet, RecordStore, ReviewRecord, StoreError};
pub use runner::{BatchError, BatchOutput, BatchRunner};
pub use stopwords::StopWords;
