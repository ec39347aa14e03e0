//! Parallel batch runner.
//!
//! Applies a [`LemmaFilter`] to every text in a batch on a fixed-size rayon
//! pool. Each worker builds one annotator through the caller's factory and
//! keeps it for the whole batch; workers pull unit indices from a shared
//! atomic cursor, and the collation step puts every result back at its input
//! index.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use lemmata_types::AnnotatorError;
use rayon::ThreadPoolBuilder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analyzer::Annotator;
use crate::config::{worker_count, FailurePolicy};
use crate::filter::LemmaFilter;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to construct annotator: {0}")]
    AnnotatorInit(#[source] AnnotatorError),
    #[error("failed to lemmatize text {index}: {source}")]
    Unit {
        index: usize,
        #[source]
        source: AnnotatorError,
    },
}

/// Results of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    /// One lemmatized text per input text.
    pub texts: Vec<String>,
    /// Indices of texts that failed under [`FailurePolicy::Isolate`],
    /// ascending. Their entry in `texts` is empty.
    pub failed: Vec<usize>,
}

/// What one worker hands back to the collation step.
#[derive(Default)]
struct WorkerResult {
    done: Vec<(usize, String)>,
    errors: Vec<(usize, AnnotatorError)>,
    init_error: Option<AnnotatorError>,
}

/// Runs a [`LemmaFilter`] over a batch of texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRunner {
    workers: Option<usize>,
    policy: FailurePolicy,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the pool size. `None` sizes it from available parallelism.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pool size this runner will use, resolved now.
    pub fn workers(&self) -> usize {
        worker_count(self.workers)
    }

    /// Lemmatizes every text, returning results in input order.
    ///
    /// # Errors
    ///
    /// See [`BatchRunner::run_detailed`].
    pub fn run<S, A, F>(
        &self,
        filter: &LemmaFilter,
        texts: &[S],
        make_annotator: F,
    ) -> Result<Vec<String>, BatchError>
    where
        S: AsRef<str> + Sync,
        A: Annotator,
        F: Fn() -> Result<A, AnnotatorError> + Sync,
    {
        self.run_detailed(filter, texts, make_annotator)
            .map(|out| out.texts)
    }

    /// Lemmatizes every text and reports isolated failures.
    ///
    /// Blocks until every worker has finished.
    ///
    /// # Errors
    ///
    /// - [`BatchError::ThreadPool`] if the pool cannot be built
    /// - [`BatchError::AnnotatorInit`] if any worker's factory call fails
    /// - [`BatchError::Unit`] for the lowest failing index under
    ///   [`FailurePolicy::Abort`]
    pub fn run_detailed<S, A, F>(
        &self,
        filter: &LemmaFilter,
        texts: &[S],
        make_annotator: F,
    ) -> Result<BatchOutput, BatchError>
    where
        S: AsRef<str> + Sync,
        A: Annotator,
        F: Fn() -> Result<A, AnnotatorError> + Sync,
    {
        if texts.is_empty() {
            return Ok(BatchOutput::default());
        }

        let workers = self.workers();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("lemmata-worker-{i}"))
            .build()?;

        let cursor = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let policy = self.policy;
        let started = Instant::now();

        let results: Vec<WorkerResult> = pool.broadcast(|ctx| {
            let mut out = WorkerResult::default();
            let mut annotator = match make_annotator() {
                Ok(a) => a,
                Err(e) => {
                    stop.store(true, Ordering::Relaxed);
                    out.init_error = Some(e);
                    return out;
                }
            };
            debug!(worker = ctx.index(), "worker started");

            while !stop.load(Ordering::Relaxed) {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(text) = texts.get(index) else {
                    break;
                };
                match filter.filter(&mut annotator, text.as_ref()) {
                    Ok(lemmas) => out.done.push((index, lemmas)),
                    Err(e) => {
                        if policy == FailurePolicy::Abort {
                            stop.store(true, Ordering::Relaxed);
                        }
                        out.errors.push((index, e));
                    }
                }
            }

            debug!(
                worker = ctx.index(),
                units = out.done.len() + out.errors.len(),
                "worker finished"
            );
            out
        });

        let output = collate(texts.len(), results, policy)?;
        debug!(
            texts = texts.len(),
            workers,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch complete"
        );
        Ok(output)
    }
}

/// Places every worker's results at their input index.
fn collate(
    len: usize,
    results: Vec<WorkerResult>,
    policy: FailurePolicy,
) -> Result<BatchOutput, BatchError> {
    let mut texts = vec![String::new(); len];
    let mut errors: Vec<(usize, AnnotatorError)> = Vec::new();

    for result in results {
        if let Some(e) = result.init_error {
            return Err(BatchError::AnnotatorInit(e));
        }
        for (index, lemmas) in result.done {
            texts[index] = lemmas;
        }
        errors.extend(result.errors);
    }

    errors.sort_by_key(|(index, _)| *index);

    if policy == FailurePolicy::Abort {
        if let Some((index, source)) = errors.into_iter().next() {
            return Err(BatchError::Unit { index, source });
        }
        return Ok(BatchOutput {
            texts,
            failed: Vec::new(),
        });
    }

    let failed = errors
        .into_iter()
        .map(|(index, e)| {
            warn!(index, error = %e, "lemmatization failed, leaving text empty");
            index
        })
        .collect();
    Ok(BatchOutput { texts, failed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::RuleAnnotator;
    use crate::stopwords::StopWords;
    use crate::config::available_parallelism;
    use lemmata_types::{PosSet, PosTag, Token};

    /// Emits the whole text as one NOUN token, failing on texts containing "!fail".
    struct Echo;

    impl Annotator for Echo {
        fn annotate(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError> {
            if text.contains("!fail") {
                return Err(AnnotatorError::InvalidInput { reason: "scripted" });
            }
            Ok(vec![Token::new(text, text, PosTag::Noun)])
        }
    }

    fn echo() -> Result<Echo, AnnotatorError> {
        Ok(Echo)
    }

    fn filter() -> LemmaFilter {
        LemmaFilter::new(StopWords::from_words([]), PosSet::CONTENT)
    }

    fn inputs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("text{i}")).collect()
    }

    #[test]
    fn preserves_order_for_any_worker_count() {
        let texts = inputs(257);
        for workers in [1, 2, 3, 8] {
            let out = BatchRunner::new()
                .with_workers(Some(workers))
                .run(&filter(), &texts, echo)
                .unwrap();
            assert_eq!(out, texts, "workers = {workers}");
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        let texts: Vec<String> = Vec::new();
        let out = BatchRunner::new().run(&filter(), &texts, echo).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_input_never_builds_annotators() {
        let calls = AtomicUsize::new(0);
        let texts: [&str; 0] = [];
        BatchRunner::new()
            .run(&filter(), &texts, || {
                calls.fetch_add(1, Ordering::Relaxed);
                echo()
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn one_annotator_per_worker() {
        let calls = AtomicUsize::new(0);
        let texts = inputs(100);
        BatchRunner::new()
            .with_workers(Some(3))
            .run(&filter(), &texts, || {
                calls.fetch_add(1, Ordering::Relaxed);
                echo()
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn abort_reports_lowest_failing_index() {
        let mut texts = inputs(50);
        texts[7] = "!fail".into();
        texts[31] = "!fail".into();

        let err = BatchRunner::new()
            .with_workers(Some(1))
            .run(&filter(), &texts, echo)
            .unwrap_err();
        assert!(matches!(err, BatchError::Unit { index: 7, .. }), "{err:?}");
    }

    #[test]
    fn abort_reports_lowest_failing_index_across_workers() {
        for first in [0usize, 3, 250, 499] {
            let texts: Vec<String> = (0..500usize)
                .map(|i| {
                    if i >= first && (i - first) % 7 == 0 {
                        "!fail".to_owned()
                    } else {
                        format!("text{i}")
                    }
                })
                .collect();

            for _ in 0..20 {
                let err = BatchRunner::new()
                    .with_workers(Some(8))
                    .run(&filter(), &texts, echo)
                    .unwrap_err();
                assert!(
                    matches!(err, BatchError::Unit { index, .. } if index == first),
                    "first = {first}: {err:?}"
                );
            }
        }
    }

    #[test]
    fn abort_is_default_policy() {
        let texts = vec!["ok".to_string(), "!fail".to_string()];
        let err = BatchRunner::new().run(&filter(), &texts, echo).unwrap_err();
        assert!(matches!(err, BatchError::Unit { index: 1, .. }));
    }

    #[test]
    fn isolate_keeps_going() {
        let mut texts = inputs(20);
        texts[3] = "!fail".into();
        texts[17] = "!fail".into();

        let out = BatchRunner::new()
            .with_workers(Some(4))
            .with_policy(FailurePolicy::Isolate)
            .run_detailed(&filter(), &texts, echo)
            .unwrap();

        assert_eq!(out.failed, vec![3, 17]);
        assert_eq!(out.texts.len(), 20);
        assert_eq!(out.texts[3], "");
        assert_eq!(out.texts[17], "");
        assert_eq!(out.texts[4], "text4");
    }

    #[test]
    fn annotator_init_failure() {
        let texts = inputs(4);
        let err = BatchRunner::new()
            .with_workers(Some(2))
            .run(&filter(), &texts, || -> Result<Echo, AnnotatorError> {
                Err(AnnotatorError::Unavailable {
                    reason: "no model".into(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, BatchError::AnnotatorInit(_)));
        assert_eq!(
            err.to_string(),
            "failed to construct annotator: annotator unavailable: no model"
        );
    }

    #[test]
    fn unit_error_display() {
        let err = BatchError::Unit {
            index: 4,
            source: AnnotatorError::InvalidInput { reason: "nul byte" },
        };
        assert_eq!(
            err.to_string(),
            "failed to lemmatize text 4: text cannot be annotated: nul byte"
        );
    }

    #[test]
    fn rule_annotator_batch_matches_sequential() {
        let texts = [
            "Great pay and benefits.",
            "My bos never listens",
            "",
            "Flexible hours, friendly coworkers!",
            "They're hiring constantly.",
        ];
        let filter = LemmaFilter::default();

        let parallel = BatchRunner::new()
            .with_workers(Some(3))
            .run(&filter, &texts, || Ok(RuleAnnotator::new()))
            .unwrap();

        let mut annotator = RuleAnnotator::new();
        let sequential: Vec<String> = texts
            .iter()
            .map(|t| filter.filter(&mut annotator, t).unwrap())
            .collect();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[2], "");
        assert!(parallel[1].ends_with("boss"));
    }

    #[test]
    fn default_workers_leave_one_core_free() {
        let expected = available_parallelism().saturating_sub(1).max(1);
        assert_eq!(BatchRunner::new().workers(), expected);
    }
}
