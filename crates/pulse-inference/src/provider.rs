//! `ModelProvider` backed by the hosted pipelines.
//!
//! The first call pays the load cost: both pipelines receive one warm-up
//! request, which makes a cold hosted model load its weights. The result is
//! memoized for the life of the provider. Concurrent first callers await the
//! same in-flight load. A failed load is not cached, so the next user action
//! tries again.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use pulse_core::{EntityMention, ModelInfo, ModelProvider, PulseError, PulseResult, SentimentResult};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::client::InferenceClient;
use crate::config::InferenceConfig;
use crate::grouping::group_entities;
use crate::wire::LabelScore;

/// Text sent to each pipeline during warm-up.
const WARMUP_TEXT: &str = "SocialPulse is warming up.";

/// Outcome of the one-time pipeline load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Labels the sentiment model produced for the warm-up text.
    pub sentiment_labels: Vec<String>,
    /// Wall time spent loading both pipelines.
    pub elapsed: Duration,
}

/// Sentiment and NER pipelines served by the inference API.
pub struct PipelineProvider {
    client: InferenceClient,
    loaded: OnceCell<LoadReport>,
}

impl PipelineProvider {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: InferenceClient::new(config),
            loaded: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &InferenceConfig {
        self.client.config()
    }

    /// Whether the pipelines have been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Load both pipelines once; later calls return the memoized report.
    pub async fn ensure_loaded(&self) -> PulseResult<&LoadReport> {
        self.loaded.get_or_try_init(|| self.load()).await
    }

    async fn load(&self) -> PulseResult<LoadReport> {
        let config = self.client.config();
        let started = Instant::now();
        info!(
            sentiment_model = %config.sentiment_model,
            ner_model = %config.ner_model,
            "Loading pipelines"
        );

        let scores = self
            .client
            .text_classification(&config.sentiment_model, WARMUP_TEXT)
            .await
            .map_err(|e| {
                warn!(error = %e, "Sentiment pipeline failed to load");
                e.into_load_error(&config.sentiment_model)
            })?;

        self.client
            .token_classification(&config.ner_model, WARMUP_TEXT)
            .await
            .map_err(|e| {
                warn!(error = %e, "NER pipeline failed to load");
                e.into_load_error(&config.ner_model)
            })?;

        let report = LoadReport {
            sentiment_labels: scores.into_iter().map(|s| s.label).collect(),
            elapsed: started.elapsed(),
        };
        info!(elapsed_ms = report.elapsed.as_millis() as u64, "Pipelines loaded");
        Ok(report)
    }
}

/// Highest-scoring label. Ties keep the first label.
fn top_label(scores: Vec<LabelScore>) -> Option<LabelScore> {
    scores.into_iter().fold(None, |best, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    })
}

#[async_trait]
impl ModelProvider for PipelineProvider {
    async fn classify_sentiment(&self, text: &str) -> PulseResult<SentimentResult> {
        self.ensure_loaded().await?;
        let model = &self.client.config().sentiment_model;

        let scores = self
            .client
            .text_classification(model, text)
            .await
            .map_err(|e| e.into_scoring_error(model))?;

        let best = top_label(scores)
            .ok_or_else(|| PulseError::inference(format!("{}: no label returned", model)))?;

        debug!(label = %best.label, score = best.score, "Sentiment classified");
        Ok(SentimentResult::new(best.label, best.score))
    }

    async fn extract_entities(&self, text: &str) -> PulseResult<Vec<EntityMention>> {
        self.ensure_loaded().await?;
        let model = &self.client.config().ner_model;

        let raw = self
            .client
            .token_classification(model, text)
            .await
            .map_err(|e| e.into_scoring_error(model))?;

        let raw_count = raw.len();
        let mentions = group_entities(text, raw);
        debug!(raw = raw_count, mentions = mentions.len(), "Entities extracted");
        Ok(mentions)
    }

    fn models(&self) -> ModelInfo {
        let config = self.client.config();
        ModelInfo {
            sentiment_model: config.sentiment_model.clone(),
            ner_model: config.ner_model.clone(),
        }
    }
}
