//! The end-to-end run: load, lemmatize, partition, save.

use std::fmt;
use std::time::{Duration, Instant};

use lemmata_types::{AnnotatorError, PosSet};
use tracing::info;

use crate::analyzer::{Annotator, RuleAnnotator};
use crate::config::{PipelineConfig, StopList};
use crate::error::PipelineError;
use crate::filter::LemmaFilter;
use crate::records::RecordStore;
use crate::runner::BatchRunner;
use crate::stopwords::StopWords;

/// Counts from one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Records loaded.
    pub records: usize,
    /// Records saved under the pro key.
    pub pro: usize,
    /// Records saved under the con key.
    pub con: usize,
    /// Records left out because of an unknown label.
    pub dropped: usize,
    /// Texts that failed to annotate and were left empty.
    pub failed: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Records processed per second of wall time.
    pub fn records_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records as f64 / secs
        } else {
            0.0
        }
    }
}

/// Groups digits with underscores: `1234567` → `1_234_567`.
fn fmt_count(n: usize) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} pro, {} con, {} dropped",
            fmt_count(self.records),
            fmt_count(self.pro),
            fmt_count(self.con),
            fmt_count(self.dropped)
        )?;
        if self.failed > 0 {
            write!(f, ", {} failed", fmt_count(self.failed))?;
        }
        write!(
            f,
            ") in {:.3}s on {} workers, {:.0} records/sec",
            self.elapsed.as_secs_f64(),
            self.workers,
            self.records_per_sec()
        )
    }
}

/// Runs the pipeline with the configured stop list and the rule-based
/// annotator.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let stop_words = match config.stop_list {
        StopList::English => StopWords::english(),
        StopList::Nltk => StopWords::nltk(),
    };
    let filter = LemmaFilter::new(stop_words, PosSet::CONTENT);
    run_with(config, &filter, || Ok(RuleAnnotator::new()))
}

/// Runs the pipeline with a caller-supplied filter and annotator factory.
///
/// The factory is called once per worker.
pub fn run_with<A, F>(
    config: &PipelineConfig,
    filter: &LemmaFilter,
    make_annotator: F,
) -> Result<RunSummary, PipelineError>
where
    A: Annotator,
    F: Fn() -> Result<A, AnnotatorError> + Sync,
{
    let started = Instant::now();
    let store = RecordStore::new(&config.data_dir);

    info!(key = %config.input_key, dir = %config.data_dir.display(), "Step 1: loading records");
    let mut records = store.load(&config.input_key).map_err(PipelineError::Load)?;
    let total = records.len();
    info!(records = total, "loaded");

    let runner = BatchRunner::new()
        .with_workers(config.workers)
        .with_policy(config.failure_policy);
    let workers = runner.workers();

    info!(workers, "Step 2: lemmatizing review_text");
    let output = {
        let texts = records.texts()?;
        runner.run_detailed(filter, &texts, make_annotator)?
    };
    let failed = output.failed.len();
    records.attach_lemmatized(output.texts);

    info!("Step 3: partitioning by pro_or_con");
    let parts = records.partition(config.unknown_labels)?;
    info!(
        pro = parts.pro.len(),
        con = parts.con.len(),
        dropped = parts.dropped,
        "partitioned"
    );

    info!(pro_key = %config.pro_key, con_key = %config.con_key, "Step 4: saving");
    store
        .save(&config.pro_key, &parts.pro)
        .map_err(PipelineError::Save)?;
    store
        .save(&config.con_key, &parts.con)
        .map_err(PipelineError::Save)?;

    let summary = RunSummary {
        records: total,
        pro: parts.pro.len(),
        con: parts.con.len(),
        dropped: parts.dropped,
        failed,
        workers,
        elapsed: started.elapsed(),
    };
    info!("Done: {summary}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(records: usize, elapsed_ms: u64) -> RunSummary {
        RunSummary {
            records,
            pro: 600,
            con: 634,
            dropped: 0,
            failed: 0,
            workers: 3,
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    #[test]
    fn fmt_count_groups_digits() {
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_count(999), "999");
        assert_eq!(fmt_count(1000), "1_000");
        assert_eq!(fmt_count(1_234_567), "1_234_567");
    }

    #[test]
    fn records_per_sec() {
        assert_eq!(summary(1000, 500).records_per_sec(), 2000.0);
        assert_eq!(summary(1000, 0).records_per_sec(), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(
            summary(1234, 2000).to_string(),
            "1_234 records (600 pro, 634 con, 0 dropped) in 2.000s on 3 workers, 617 records/sec"
        );
    }

    #[test]
    fn display_mentions_failures_only_when_present() {
        let mut s = summary(10, 1000);
        assert!(!s.to_string().contains("failed"));
        s.failed = 2;
        assert!(s.to_string().contains(", 2 failed)"));
    }
}
