// Progress reporting and cooperative cancellation for comparison runs.
//
// The driver knows nothing about terminals or dialogs. It announces the total
// pair count up front, reports after every scored pair, and polls a
// `CancelToken` before starting each pair. The CLI wires these to an
// indicatif bar and a Ctrl-C handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::models::RunStatistics;

/// Receives progress events from a comparison run.
///
/// All methods have default no-op implementations. Calls happen between pair
/// iterations on the thread running the comparison, never mid-pair.
pub trait ProgressReporter: Send + Sync {
    /// Called once, before the first pair is scored.
    fn on_compare_start(&self, _total_pairs: usize) {}
    /// Called after each pair with the cumulative number of pairs scored.
    fn on_pair_scored(&self, _pairs_done: usize, _total_pairs: usize) {}
    fn on_compare_complete(&self, _stats: &RunStatistics) {}
    fn on_cancelled(&self, _pairs_done: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Shared cancellation flag. Clone it, hand one copy to whoever decides to
/// stop (a signal handler, a UI button), and pass the other to the run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next pair boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
