//! CLI command definitions and handlers.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pulse_inference::config::{
    ENV_API_URL, ENV_NER_MODEL, ENV_SENTIMENT_MODEL, ENV_TIMEOUT_SECS, ENV_TOKEN,
};
use pulse_inference::{InferenceConfig, LoadReport, PipelineProvider};

pub mod analyze;
pub mod check;
pub mod samples;
pub mod serve;

/// SocialPulse - AI-powered social media text analyzer
#[derive(Parser)]
#[command(name = "socialpulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Inference API base URL
    #[arg(long, global = true, env = ENV_API_URL)]
    pub api_url: Option<String>,

    /// Access token for the inference API
    #[arg(long, global = true, env = ENV_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// Sentiment model id
    #[arg(long, global = true, env = ENV_SENTIMENT_MODEL)]
    pub sentiment_model: Option<String>,

    /// Entity recognition model id
    #[arg(long, global = true, env = ENV_NER_MODEL)]
    pub ner_model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Analyze text in the terminal
    Analyze(analyze::AnalyzeArgs),

    /// List the preset sample texts
    Samples,

    /// Load both models and report the configuration
    Check,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.inference_config()?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Analyze(args) => analyze::execute(args, config).await,
            Commands::Samples => samples::execute(),
            Commands::Check => check::execute(config).await,
        }
    }

    /// Defaults overridden by flags or their environment variables.
    ///
    /// clap has already resolved each flag against its variable, so the
    /// parsed values serve as the lookup.
    fn inference_config(&self) -> Result<InferenceConfig> {
        let timeout = self.timeout_secs.map(|secs| secs.to_string());
        let config = InferenceConfig::from_lookup(|key| match key {
            ENV_API_URL => self.api_url.clone(),
            ENV_TOKEN => self.token.clone(),
            ENV_SENTIMENT_MODEL => self.sentiment_model.clone(),
            ENV_NER_MODEL => self.ner_model.clone(),
            ENV_TIMEOUT_SECS => timeout.clone(),
            _ => None,
        })?;
        Ok(config)
    }
}

/// Load the models behind a spinner.
pub(crate) async fn load_with_spinner(provider: &PipelineProvider) -> pulse_core::PulseResult<LoadReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Loading GenAI Models...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = provider.ensure_loaded().await.cloned();
    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "socialpulse",
            "--ner-model",
            "dslim/bert-base-NER",
            "--timeout-secs",
            "5",
            "samples",
        ]);
        let config = cli.inference_config().unwrap();

        assert_eq!(config.ner_model, "dslim/bert-base-NER");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_flags_keep_defaults() {
        let cli = parse(&["socialpulse", "--token", " ", "--sentiment-model", "", "samples"]);
        let config = cli.inference_config().unwrap();

        assert!(config.token.is_none());
        assert_eq!(config.sentiment_model, pulse_inference::config::DEFAULT_SENTIMENT_MODEL);
    }

    #[test]
    fn test_bad_api_url_is_rejected() {
        let cli = parse(&["socialpulse", "--api-url", "localhost:8080", "samples"]);
        assert!(cli.inference_config().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = parse(&["socialpulse", "--timeout-secs", "0", "check"]);
        assert!(cli.inference_config().is_err());
    }

    #[test]
    fn test_analyze_args() {
        let cli = parse(&["socialpulse", "analyze", "--sample", "tweet-1", "--json"]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.sample.as_deref(), Some("tweet-1"));
                assert!(args.json);
                assert!(args.text.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = parse(&["socialpulse", "serve"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 8501);
                assert_eq!(args.host, "127.0.0.1");
                assert!(!args.log);
            }
            _ => panic!("expected serve"),
        }
    }
}
