//! Error types for todoist-log
//!
//! This module defines the error types used throughout the exporter,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for todoist-log operations
///
/// Covers configuration loading, interactive input validation, the
/// completed-items HTTP exchange, and report output.
#[derive(Error, Debug)]
pub enum TodoistLogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The service rejected the API token (HTTP 403)
    #[error("Invalid API token")]
    InvalidCredential,

    /// Transport failure, timeout, or unexpected HTTP status
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body did not match the completed-items schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An item referenced a project missing from its page
    #[error("Unknown project id in response: {0}")]
    UnknownProject(String),

    /// An item referenced a section missing from its page
    #[error("Unknown section id in response: {0}")]
    UnknownSection(String),

    /// Date input not in `YYMMDD` form
    #[error("Invalid date '{0}': expected YYMMDD")]
    InvalidDate(String),

    /// Time input not in `HH:MM:SS` form
    #[error("Invalid time '{0}': expected HH:MM:SS")]
    InvalidTime(String),

    /// Timestamp input not in `YYYY-MM-DDTHH:MM:SS` form
    #[error("Invalid timestamp '{0}': expected YYYY-MM-DDTHH:MM:SS")]
    InvalidTimestamp(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for todoist-log operations
///
/// Uses `anyhow::Error` so callers can attach context; the typed
/// [`TodoistLogError`] is recovered with `downcast_ref` where a caller
/// needs to branch on the failure kind.
pub type Result<T> = anyhow::Result<T>;
