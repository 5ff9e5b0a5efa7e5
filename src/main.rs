//! todoist-log - export completed Todoist tasks
//!
#![doc = "todoist-log - export completed Todoist tasks"]
#![doc = "Main entry point for the todoist-log exporter."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todoist_log::cli::Cli;
use todoist_log::commands;
use todoist_log::config::Config;
use todoist_log::input::{ConsoleTerminal, InputOverrides};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    tracing::info!("Starting completed task export");
    let mut term = ConsoleTerminal::new()?;
    commands::run(config, &mut term, InputOverrides::from(&cli)).await
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with the prompts.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "todoist_log=debug"
    } else {
        "todoist_log=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
