//! Web server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pulse_core::Analyzer;
use pulse_inference::{InferenceConfig, PipelineProvider};

use super::load_with_spinner;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8501")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Mirror log output to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to .socialpulse/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: InferenceConfig) -> Result<()> {
    let provider = Arc::new(PipelineProvider::new(config));

    // A failed load is not fatal; the first analysis tries again.
    if let Err(e) = load_with_spinner(&provider).await {
        tracing::warn!(error = %e, "Models not loaded at startup");
        println!("  {} {}", "!".yellow().bold(), e.to_string().yellow());
    }

    println!();
    println!("  {} {}", "SocialPulse".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Page".green(), args.host, args.port);
    println!("  {}   http://{}:{}/api/analyze", "API".green(), args.host, args.port);
    println!("  {} http://{}:{}/health", "Health".green(), args.host, args.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let analyzer = Analyzer::new(provider);
    pulse_web::run_server(analyzer, &args.host, args.port).await
}
