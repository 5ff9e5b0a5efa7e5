//! Command-line interface definition for todoist-log
//!
//! This module defines the CLI structure using clap's derive API. Every
//! flag is optional: anything not supplied on the command line is asked
//! for interactively.

use clap::Parser;
use std::path::PathBuf;

/// todoist-log - export completed Todoist tasks to a tab-delimited file
///
/// Prompts for an API token and a date/time range, fetches every task
/// completed in that range, and writes them sorted to
/// `todoist_<since>_<until>.TXT`.
#[derive(Parser, Debug, Clone)]
#[command(name = "todoist-log")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Todoist API token (skips the token prompt)
    #[arg(long, env = "TODOIST_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Range start as YYYY-MM-DDTHH:MM:SS (skips the start prompts)
    #[arg(long)]
    pub since: Option<String>,

    /// Range end as YYYY-MM-DDTHH:MM:SS (skips the end prompts)
    #[arg(long)]
    pub until: Option<String>,

    /// Directory to write the report into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            token: None,
            since: None,
            until: None,
            output_dir: None,
            no_pause: false,
        }
    }
}
