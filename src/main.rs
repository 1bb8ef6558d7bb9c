use clap::{Parser, ValueEnum};
use funds_transfer::application::coordinator::TransferCoordinator;
use funds_transfer::domain::ledger::Ledger;
use funds_transfer::domain::transfer::{TransferOutcome, TransferRequest};
use funds_transfer::error::{LedgerError, Result as LedgerResult};
use funds_transfer::interfaces::csv::account_reader::AccountReader;
use funds_transfer::interfaces::csv::balance_writer::{BalanceWriter, write_balances_json};
use funds_transfer::interfaces::csv::transfer_reader::{TransferReader, TransferRow};
use funds_transfer::logging::init_logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

const WORKER_QUEUE_CAPACITY: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Account seeds CSV file (`account,balance`)
    accounts: PathBuf,

    /// Transfers CSV file (`from,to,amount`)
    transfers: PathBuf,

    /// Number of concurrent workers the transfers are dealt across.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    workers: u16,

    /// Output format for the final balances.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Default)]
struct Summary {
    completed: u64,
    insufficient_funds: u64,
    rolled_back: u64,
    rejected: u64,
    unreadable: u64,
}

impl Summary {
    fn record(&mut self, outcome: TransferOutcome) {
        match outcome {
            TransferOutcome::Completed => self.completed += 1,
            TransferOutcome::InsufficientFunds => self.insufficient_funds += 1,
            TransferOutcome::RolledBack => self.rolled_back += 1,
        }
    }

    fn merge(&mut self, other: Summary) {
        self.completed += other.completed;
        self.insufficient_funds += other.insufficient_funds;
        self.rolled_back += other.rolled_back;
        self.rejected += other.rejected;
        self.unreadable += other.unreadable;
    }
}

/// Runs every row it receives through the coordinator.
///
/// Validation errors are reported and skipped; anything else aborts the batch.
async fn run_worker(
    coordinator: TransferCoordinator,
    mut rows: mpsc::Receiver<(usize, TransferRow)>,
) -> LedgerResult<Summary> {
    let mut summary = Summary::default();
    while let Some((line, row)) = rows.recv().await {
        let outcome = match TransferRequest::new(row.from, row.to, row.amount) {
            Ok(request) => coordinator.execute(request).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(outcome) => summary.record(outcome),
            Err(e) if e.is_validation() => {
                warn!(line, "Error processing transfer: {}", e);
                summary.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}

/// Deals `rows` round-robin to `workers` tasks and merges their summaries.
///
/// If a worker stops on a fatal error its queue closes; dispatch stops there
/// and that worker's error is returned.
async fn run_batch<I>(
    coordinator: &TransferCoordinator,
    rows: I,
    workers: usize,
) -> LedgerResult<Summary>
where
    I: IntoIterator<Item = LedgerResult<TransferRow>>,
{
    let mut queues = Vec::with_capacity(workers);
    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let (tx, rx) = mpsc::channel(WORKER_QUEUE_CAPACITY);
        queues.push(tx);
        handles.push(tokio::spawn(run_worker(coordinator.clone(), rx)));
    }

    let mut summary = Summary::default();
    for (index, row) in rows.into_iter().enumerate() {
        // Line 1 is the header.
        let line = index + 2;
        match row {
            Ok(row) => {
                if queues[index % workers].send((line, row)).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(line, "Error reading transfer: {}", e);
                summary.unreadable += 1;
            }
        }
    }
    drop(queues);

    let mut failure = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(worker_summary)) => summary.merge(worker_summary),
            Ok(Err(e)) => {
                failure.get_or_insert(e);
            }
            Err(e) => {
                failure.get_or_insert(LedgerError::IoError(io::Error::other(e)));
            }
        }
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let seeds = AccountReader::new(File::open(&cli.accounts).into_diagnostic()?)
        .seeds()
        .collect::<LedgerResult<Vec<_>>>()
        .into_diagnostic()?;
    let ledger = Arc::new(Ledger::new(seeds).into_diagnostic()?);
    let coordinator = TransferCoordinator::new(Arc::clone(&ledger));

    let reader = TransferReader::new(File::open(&cli.transfers).into_diagnostic()?);
    let summary = run_batch(&coordinator, reader.transfers(), usize::from(cli.workers))
        .await
        .into_diagnostic()?;
    info!(
        completed = summary.completed,
        insufficient_funds = summary.insufficient_funds,
        rolled_back = summary.rolled_back,
        rejected = summary.rejected,
        unreadable = summary.unreadable,
        "Batch finished"
    );

    let snapshot = ledger.snapshot().await;
    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => BalanceWriter::new(stdout.lock())
            .write_balances(&snapshot)
            .into_diagnostic()?,
        OutputFormat::Json => write_balances_json(stdout.lock(), &snapshot).into_diagnostic()?,
    }

    Ok(())
}
