use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, warn};

use copycat::classify::matrix::{build_matrix, FullMatrix, MatrixSummary};
use copycat::classify::records::{build_records, search_records, unscored_records, RecordBook};
use copycat::config::Config;
use copycat::documents::loader::{load_directory, split};
use copycat::engine::{compare, CancelToken, ProgressReporter, RunError, RunOutcome};
use copycat::models::{Document, RunReport, RunStatistics};
use copycat::output;

/// Copycat: near-duplicate submission detection.
///
/// Compares every pair of submissions in a folder by shared vocabulary and
/// flags the ones that overlap too much with something else.
#[derive(Parser)]
#[command(name = "copycat", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every pair of submissions and show flagged files
    Check {
        /// Submissions folder (default: COPYCAT_DOCS_DIR or ./submissions)
        dir: Option<PathBuf>,

        /// Only list files above the flag threshold
        #[arg(long)]
        high_only: bool,

        /// Only list files whose name or type contains this text
        #[arg(long)]
        search: Option<String>,

        /// Also export the full similarity matrix as CSV (optionally to PATH)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        csv: Option<Option<PathBuf>>,

        /// Also write a paginated Markdown report (optionally to PATH)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        report: Option<Option<PathBuf>>,

        /// Print the raw run results as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List the submissions that would be compared
    Files {
        /// Submissions folder (default: COPYCAT_DOCS_DIR or ./submissions)
        dir: Option<PathBuf>,

        /// Only list files whose name or type contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Export the full similarity matrix as CSV
    Matrix {
        /// Submissions folder (default: COPYCAT_DOCS_DIR or ./submissions)
        dir: Option<PathBuf>,

        /// Output file (default: <COPYCAT_OUTPUT_DIR>/similarity-matrix.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging on stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("copycat=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            dir,
            high_only,
            search,
            csv,
            report,
            json,
        } => {
            let config = load_config(dir)?;
            let (documents, metadata) =
                split(load_directory(&config.docs_dir, &config.extensions)?);

            // The table is rebuilt from scratch for every run
            let mut book = RecordBook::new();
            book.replace(unscored_records(&metadata));

            if !json {
                println!("Analyzing {} files for plagiarism...", documents.len());
            }

            let (outcome, documents) = run_with_ctrl_c(documents, json).await?;

            let Some(run_report) = completed_or_notify(outcome, json)? else {
                book.clear();
                return Ok(());
            };

            book.replace(build_records(&metadata, &run_report.aggregates));

            if json {
                println!("{}", serde_json::to_string_pretty(&run_report)?);
            } else {
                let mut view = book.view(high_only);
                if let Some(query) = search.as_deref() {
                    view.records = search_records(&view.records, query);
                }

                output::terminal::display_run_summary(&run_report.stats);
                output::terminal::display_assignments(&view, high_only);
                output::terminal::display_matrix(
                    &build_matrix(&run_report.pairs),
                    &MatrixSummary::from_pairs(&run_report.pairs),
                );
            }

            if let Some(path) = csv {
                let path = path.unwrap_or_else(|| config.default_csv_path());
                let written = output::csv::export_matrix(&run_matrix(&documents, &run_report)?, &path)?;
                eprintln!("{}", format!("CSV matrix saved to: {}", written.display()).bold());
            }

            if let Some(path) = report {
                let path = path.unwrap_or_else(|| config.default_report_path());
                let written = output::markdown::generate_report(
                    &run_report,
                    book.records(),
                    config.report_page_size,
                    &path,
                )?;
                eprintln!("{}", format!("Markdown report saved to: {written}").bold());
            }
        }

        Commands::Files { dir, search } => {
            let config = load_config(dir)?;
            let (_, metadata) = split(load_directory(&config.docs_dir, &config.extensions)?);

            let mut book = RecordBook::new();
            book.replace(unscored_records(&metadata));

            let mut view = book.view(false);
            if let Some(query) = search.as_deref() {
                view.records = search_records(&view.records, query);
            }
            output::terminal::display_assignments(&view, false);
        }

        Commands::Matrix { dir, out } => {
            let config = load_config(dir)?;
            let (documents, _) = split(load_directory(&config.docs_dir, &config.extensions)?);

            let (outcome, documents) = run_with_ctrl_c(documents, false).await?;
            let Some(run_report) = completed_or_notify(outcome, false)? else {
                return Ok(());
            };

            let path = out.unwrap_or_else(|| config.default_csv_path());
            let written = output::csv::export_matrix(&run_matrix(&documents, &run_report)?, &path)?;
            println!("{}", format!("CSV matrix saved to: {}", written.display()).bold());
        }
    }

    Ok(())
}

/// Load config from the environment, letting a folder argument override it.
fn load_config(dir: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(dir) = dir {
        config.docs_dir = dir;
    }
    config.require_docs_dir()?;
    Ok(config)
}

/// Unwrap a finished run, printing why there is nothing to show otherwise.
///
/// Notices go to stderr when stdout is reserved for JSON.
fn completed_or_notify(
    outcome: Result<RunOutcome, RunError>,
    json: bool,
) -> Result<Option<RunReport>> {
    let notice = match outcome {
        Ok(RunOutcome::Completed(run_report)) => return Ok(Some(run_report)),
        Err(RunError::InsufficientInput { found }) => format!(
            "{} Please add at least two files to compare (found {found}).",
            "Not enough files.".yellow().bold()
        ),
        Err(e) => return Err(e.into()),
        Ok(RunOutcome::Cancelled { pairs_processed }) => format!(
            "\n{} after {pairs_processed} comparisons. No results were recorded.",
            "Comparison cancelled".yellow().bold()
        ),
    };

    if json {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
    Ok(None)
}

/// The export matrix for a completed run, rebuilt from its recorded scores.
fn run_matrix(documents: &[Document], run_report: &RunReport) -> Result<FullMatrix> {
    let names = documents.iter().map(|d| d.name.clone()).collect();
    FullMatrix::from_pair_scores(names, &run_report.pair_scores)
        .context("Run scores do not match the loaded documents")
}

/// Run the comparison on a blocking thread while Ctrl-C requests cancellation.
///
/// Hands the documents back so the caller can still export from them.
async fn run_with_ctrl_c(
    documents: Vec<Document>,
    quiet: bool,
) -> Result<(Result<RunOutcome, RunError>, Vec<Document>)> {
    let cancel = CancelToken::new();

    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Cancellation requested, stopping after the current pair");
                cancel.cancel();
            }
        })
    };

    let reporter = BarReporter::new(quiet);
    let result = tokio::task::spawn_blocking(move || {
        let outcome = compare(&documents, &reporter, &cancel);
        (outcome, documents)
    })
    .await;

    watcher.abort();
    Ok(result?)
}

/// Drives an indicatif bar from comparison progress events.
struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        let style = ProgressStyle::default_bar()
            .template("  Comparing [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl ProgressReporter for BarReporter {
    fn on_compare_start(&self, total_pairs: usize) {
        self.bar.set_length(total_pairs as u64);
        self.bar.set_position(0);
    }

    fn on_pair_scored(&self, pairs_done: usize, _total_pairs: usize) {
        self.bar.set_position(pairs_done as u64);
    }

    fn on_compare_complete(&self, stats: &RunStatistics) {
        self.bar.finish_and_clear();
        info!(total_pairs = stats.total_pairs, "All pairs compared");
    }

    fn on_cancelled(&self, _pairs_done: usize) {
        self.bar.abandon();
    }
}
