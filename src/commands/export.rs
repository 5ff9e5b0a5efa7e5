//! Export command: fetch completed tasks for a range and write the report

use crate::config::Config;
use crate::error::{Result, TodoistLogError};
use crate::input::{collect_request, InputOverrides, Terminal};
use crate::report::write_report;
use crate::todoist::{fetch_completed_rows, PageSource, TimeRange, TodoistClient};
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// How an export run ended
///
/// Only a written report produces a file. A rejected token and an
/// unreachable service are reported to the user but are not errors of
/// the run itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Report written
    Written {
        /// File that was written
        path: PathBuf,
        /// Number of rows in the file
        rows: usize,
    },
    /// Retrieval succeeded but the range holds no completed tasks
    NoTasks,
    /// The service rejected the API token
    InvalidCredential,
    /// The service could not be reached or answered with an error status
    Unreachable(String),
}

impl ExportOutcome {
    /// Print the outcome message, colored by severity
    pub fn print(&self) {
        let message = self.to_string();
        match self {
            ExportOutcome::Written { .. } => println!("{}", message.green()),
            ExportOutcome::NoTasks => println!("{}", message.yellow()),
            ExportOutcome::InvalidCredential | ExportOutcome::Unreachable(_) => {
                println!("{}", message.red())
            }
        }
    }
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::Written { path, .. } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                write!(f, "completed tasks written to '{}'", name)
            }
            ExportOutcome::NoTasks => write!(f, "No completed tasks found in date range."),
            ExportOutcome::InvalidCredential => write!(f, "Invalid API token"),
            ExportOutcome::Unreachable(reason) => write!(f, "Failed to reach Todoist: {}", reason),
        }
    }
}

/// Fetch every completed task in `range` from `source` and write the report
///
/// A rejected token or a failed request ends the export with nothing
/// written, whatever pages had already arrived.
///
/// # Errors
///
/// Returns error for a malformed response, an unresolvable project or
/// section id, or a failed file write
pub async fn run_export<S>(
    config: &Config,
    source: &S,
    range: &TimeRange,
) -> Result<ExportOutcome>
where
    S: PageSource + ?Sized,
{
    let mut rows = match fetch_completed_rows(source, range, config.api.page_size).await {
        Ok(rows) => rows,
        Err(e) => {
            return match e.downcast_ref::<TodoistLogError>() {
                Some(TodoistLogError::InvalidCredential) => Ok(ExportOutcome::InvalidCredential),
                Some(TodoistLogError::Connection(reason)) => {
                    Ok(ExportOutcome::Unreachable(reason.clone()))
                }
                _ => Err(e),
            };
        }
    };

    if rows.is_empty() {
        return Ok(ExportOutcome::NoTasks);
    }

    let path = write_report(&config.output.directory, range, &mut rows)?;
    Ok(ExportOutcome::Written {
        path,
        rows: rows.len(),
    })
}

/// Collect input on `term`, run the export against Todoist, print the outcome
///
/// # Errors
///
/// Returns error if input is closed, the client cannot be built, or the
/// export fails fatally
pub async fn run_interactive(
    config: &Config,
    term: &mut impl Terminal,
    overrides: &InputOverrides,
) -> Result<ExportOutcome> {
    let today = chrono::Local::now().date_naive();
    let request = collect_request(term, &config.range, today, overrides)?;

    tracing::info!(
        since = %request.range.since,
        until = %request.range.until,
        "Starting export"
    );
    term.say("communicating with Todoist server...");

    let client = TodoistClient::new(&config.api, request.token)?;
    let outcome = run_export(config, &client, &request.range).await?;
    outcome.print();
    Ok(outcome)
}

/// Entry point used by the binary
///
/// Waits for Enter on `term` before returning when `output.pause_on_exit`
/// is set, on both the success and the failure path. A fatal error is
/// returned to the caller for reporting rather than printed here.
///
/// # Errors
///
/// Returns the export error after the pause
pub async fn run(
    config: Config,
    term: &mut impl Terminal,
    overrides: InputOverrides,
) -> Result<()> {
    let result = run_interactive(&config, term, &overrides).await;
    if let Err(e) = &result {
        tracing::debug!("Export failed: {:#}", e);
    }

    if config.output.pause_on_exit {
        // Closed input just means there is nobody to wait for.
        let _ = term.read_line("press Enter to close...");
    }

    result.map(|_| ())
}
