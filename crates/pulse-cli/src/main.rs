//! SocialPulse CLI
//!
//! Runs the analysis page as a web server, or analyzes text straight from
//! the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

const SERVER_FILTER: &str = "socialpulse=info,pulse_web=debug,pulse_inference=info,pulse_core=info";
const QUIET_FILTER: &str = "socialpulse=warn,pulse_web=warn,pulse_inference=warn,pulse_core=warn";

/// Initialize tracing with optional file logging.
///
/// Terminal commands log to stderr so stdout carries only their results.
fn init_tracing(log_file: Option<&std::path::Path>, server_mode: bool, verbose: bool) -> Result<()> {
    let default_filter = if server_mode || verbose { SERVER_FILTER } else { QUIET_FILTER };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        // Log to both stdout and file when --log is used
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else if server_mode {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| std::path::PathBuf::from(".socialpulse/serve.log")),
        ),
        _ => None,
    };

    let server_mode = matches!(&cli.command, Commands::Serve(_));
    init_tracing(log_file.as_deref(), server_mode, cli.verbose)?;

    cli.execute().await
}
