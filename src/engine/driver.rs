// Comparison driver: scores every unordered pair in a document batch.
//
// Pairs are visited in input order (i ascending, then j ascending), which only
// affects the order of progress callbacks and of the reported pair list. The
// aggregates themselves are max/sum and don't depend on visiting order.
//
// Each document is normalized at most once per run: token sets are cached by
// index the first time a pair needs them, so a batch of n documents costs n
// normalizations and n*(n-1)/2 set comparisons.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info};

use super::progress::{CancelToken, ProgressReporter};
use super::similarity::similarity;
use super::tokenize::{normalize, TokenSet};
use crate::classify::bands::is_report_worthy;
use crate::models::{AggregateScores, Document, PairResult, RunReport, RunStatistics};

/// Reasons a run never starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("At least two documents are needed to compare (got {found})")]
    InsufficientInput { found: usize },

    #[error("A comparison run is already in progress")]
    AlreadyRunning,
}

/// How a run ended. Cancellation is not an error, but it exposes no results.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunReport),
    Cancelled { pairs_processed: usize },
}

impl RunOutcome {
    /// The report, if the run completed.
    pub fn completed(self) -> Option<RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Cancelled { .. } => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled { .. })
    }
}

/// Number of unordered pairs in a batch of `n` documents.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Runs comparisons, one at a time.
///
/// A second `run` call while one is in flight (from another thread, or from
/// inside a progress callback) is rejected with `RunError::AlreadyRunning`.
#[derive(Debug, Default)]
pub struct Comparator {
    busy: AtomicBool,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Compare every pair in `documents`.
    ///
    /// The batch is read-only for the duration of the run. Returns
    /// `Cancelled` as soon as `cancel` is observed at a pair boundary, with
    /// no partial aggregates.
    pub fn run(
        &self,
        documents: &[Document],
        reporter: &dyn ProgressReporter,
        cancel: &CancelToken,
    ) -> Result<RunOutcome, RunError> {
        if documents.len() < 2 {
            return Err(RunError::InsufficientInput {
                found: documents.len(),
            });
        }

        let _guard = BusyGuard::acquire(&self.busy)?;
        Ok(run_pairs(documents, reporter, cancel))
    }
}

/// Run a one-off comparison on a fresh `Comparator`.
pub fn compare(
    documents: &[Document],
    reporter: &dyn ProgressReporter,
    cancel: &CancelToken,
) -> Result<RunOutcome, RunError> {
    Comparator::new().run(documents, reporter, cancel)
}

/// Clears the busy flag when the run ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, RunError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| RunError::AlreadyRunning)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn run_pairs(
    documents: &[Document],
    reporter: &dyn ProgressReporter,
    cancel: &CancelToken,
) -> RunOutcome {
    let n = documents.len();
    let total_pairs = pair_count(n);
    info!(documents = n, total_pairs, "Starting comparison run");
    reporter.on_compare_start(total_pairs);

    let mut aggregates: AggregateScores = documents
        .iter()
        .map(|doc| (doc.name.clone(), 0.0))
        .collect();
    let mut token_cache: Vec<Option<TokenSet>> = vec![None; n];
    let mut pairs = Vec::new();
    let mut pair_scores = Vec::with_capacity(total_pairs);
    let mut significant_sum = 0.0;
    let mut significant_pair_count = 0usize;
    let mut pairs_done = 0usize;

    for i in 0..n {
        for j in (i + 1)..n {
            if cancel.is_cancelled() {
                info!(pairs_done, total_pairs, "Comparison run cancelled");
                reporter.on_cancelled(pairs_done);
                return RunOutcome::Cancelled {
                    pairs_processed: pairs_done,
                };
            }

            let score = {
                // i < j, so the two cache slots live on opposite sides of the split
                let (head, tail) = token_cache.split_at_mut(j);
                let tokens_i = head[i].get_or_insert_with(|| normalize(&documents[i].text));
                let tokens_j = tail[0].get_or_insert_with(|| normalize(&documents[j].text));
                similarity(tokens_i, tokens_j)
            };

            let (doc_i, doc_j) = (&documents[i], &documents[j]);
            debug!(a = %doc_i.name, b = %doc_j.name, score, "Scored pair");

            pair_scores.push(score);
            raise(&mut aggregates, &doc_i.name, score);
            raise(&mut aggregates, &doc_j.name, score);

            if score > 0.0 {
                significant_sum += score;
                significant_pair_count += 1;
            }

            // Same-named documents share an aggregate slot but never form a reported pair
            if is_report_worthy(score) && doc_i.name != doc_j.name {
                pairs.push(PairResult {
                    name_a: doc_i.name.clone(),
                    name_b: doc_j.name.clone(),
                    score,
                });
            }

            pairs_done += 1;
            reporter.on_pair_scored(pairs_done, total_pairs);
        }
    }

    let mean_of_significant_pairs = if significant_pair_count > 0 {
        significant_sum / significant_pair_count as f64
    } else {
        0.0
    };

    let stats = RunStatistics {
        mean_of_significant_pairs,
        significant_pair_count,
        total_pairs,
    };

    info!(
        reported = pairs.len(),
        significant = significant_pair_count,
        mean = mean_of_significant_pairs,
        "Comparison run complete"
    );
    reporter.on_compare_complete(&stats);

    RunOutcome::Completed(RunReport {
        aggregates,
        pairs,
        stats,
        pair_scores,
    })
}

fn raise(aggregates: &mut AggregateScores, name: &str, score: f64) {
    if let Some(best) = aggregates.get_mut(name) {
        if score > *best {
            *best = score;
        }
    }
}
