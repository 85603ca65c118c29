// Similarity engine: tokenization, pair scoring, and the comparison driver.

pub mod driver;
pub mod progress;
pub mod similarity;
pub mod tokenize;

pub use driver::{compare, Comparator, RunError, RunOutcome};
pub use progress::{CancelToken, ProgressReporter, SilentReporter};
