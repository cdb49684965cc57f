//! Terminal analysis command.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use pulse_core::analysis::validate;
use pulse_core::{AnalysisRequest, Analyzer, SampleSource};
use pulse_inference::{InferenceConfig, PipelineProvider};

use super::load_with_spinner;
use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze
    pub text: Option<String>,

    /// Analyze a preset sample instead (e.g. sample-tweet-1)
    #[arg(long, short, conflicts_with = "text")]
    pub sample: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Text to analyze: the argument, a preset sample, or empty.
fn resolve_text(args: &AnalyzeArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    let Some(slug) = args.sample.as_deref() else {
        return Ok(String::new());
    };

    let source = SampleSource::from_slug(slug).with_context(|| {
        let known: Vec<&str> = SampleSource::ALL.iter().map(|s| s.slug()).collect();
        format!("Unknown sample '{}'. Known samples: {}", slug, known.join(", "))
    })?;

    Ok(source.text().unwrap_or_default().to_string())
}

pub async fn execute(args: AnalyzeArgs, config: InferenceConfig) -> Result<()> {
    let request = AnalysisRequest::new(resolve_text(&args)?);

    // Blank input is a warning, and no model gets loaded for it.
    if let Err(e) = validate(&request) {
        output::print_warning(&e.to_string());
        return Ok(());
    }

    let provider = Arc::new(PipelineProvider::new(config));
    load_with_spinner(&provider).await?;

    let analyzer = Analyzer::new(provider);
    let response = analyzer.analyze(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output::print_analysis(&request.text, &response);
    }

    Ok(())
}
