//! Model provider contract.
//!
//! The orchestrator only sees this trait, so the concrete pipelines (and
//! the model versions behind them) can be swapped, and tests can plug in
//! deterministic stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::model::{EntityMention, SentimentResult};
use crate::error::PulseResult;

/// Identifiers of the pretrained models behind a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub sentiment_model: String,
    pub ner_model: String,
}

/// Pretrained sentiment and entity pipelines.
///
/// Both calls take non-empty text and have no side effects beyond
/// computation. Implementations load their models at most once and share
/// them read-only across requests.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Classify the text. Returns exactly one label and confidence.
    async fn classify_sentiment(&self, text: &str) -> PulseResult<SentimentResult>;

    /// Extract grouped entity mentions. An empty list is a valid outcome.
    async fn extract_entities(&self, text: &str) -> PulseResult<Vec<EntityMention>>;

    /// The models in use.
    fn models(&self) -> ModelInfo;
}
