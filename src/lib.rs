//! todoist-log - completed task exporter library
//!
//! Fetches every task completed in a date/time range from Todoist's
//! completed-items endpoint and writes them, sorted, to a tab-delimited
//! text file.
//!
//! # Architecture
//!
//! - `input`: token and range prompts with per-field validation and defaults
//! - `todoist`: wire types, the HTTP client, and the pagination loop
//! - `report`: row projection, sorting, and the output file
//! - `commands`: the export flow tying the pieces together
//! - `config`: configuration management and validation
//! - `credential`: the redacted API token
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use todoist_log::config::Config;
//! use todoist_log::credential::ApiToken;
//! use todoist_log::input::parse_timestamp;
//! use todoist_log::todoist::{TimeRange, TodoistClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let token = ApiToken::new("0123456789abcdef").unwrap();
//!     let client = TodoistClient::new(&config.api, token)?;
//!     let range = TimeRange::new(
//!         parse_timestamp("2023-01-01T00:00:00")?,
//!         parse_timestamp("2023-01-07T23:59:59")?,
//!     );
//!     let outcome = todoist_log::commands::run_export(&config, &client, &range).await?;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod credential;
pub mod error;
pub mod input;
pub mod report;
pub mod todoist;

// Re-export commonly used types
pub use commands::ExportOutcome;
pub use config::Config;
pub use error::{Result, TodoistLogError};
pub use report::ResultRow;
pub use todoist::{Page, PageSource, TimeRange, TodoistClient};
