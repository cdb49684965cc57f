//! Model check command.

use anyhow::Result;
use colored::Colorize;
use pulse_inference::{InferenceConfig, PipelineProvider};

use super::load_with_spinner;
use crate::output;

pub async fn execute(config: InferenceConfig) -> Result<()> {
    println!("{}", "Configuration".bold());
    output::print_field("API", &config.api_url);
    output::print_field("Token", if config.token.is_some() { "set" } else { "not set" });
    output::print_field("Sentiment model", &config.sentiment_model);
    output::print_field("NER model", &config.ner_model);
    output::print_field("Timeout", &format!("{}s", config.timeout.as_secs()));
    println!();

    let provider = PipelineProvider::new(config);
    let report = load_with_spinner(&provider).await?;

    println!("{} Models loaded in {} ms", "✓".green().bold(), report.elapsed.as_millis());
    output::print_field("Sentiment labels", &report.sentiment_labels.join(", "));
    Ok(())
}
