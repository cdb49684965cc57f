//! Analysis orchestration.
//!
//! A single linear pass per request:
//! `Idle -> Validating -> (Scoring -> Shaping -> Done) | Rejected`.

pub mod model;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::error::{PulseError, PulseResult};
use crate::provider::{ModelInfo, ModelProvider};
use model::{AnalysisRequest, AnalysisResponse, EntityMention, SentimentResult};

/// Message shown when the submitted text is empty.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";

/// Stages of one analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Idle,
    Validating,
    Scoring,
    Shaping,
    Done,
    Rejected,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Scoring => "scoring",
            Self::Shaping => "shaping",
            Self::Done => "done",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs requests through the model provider and shapes the results.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn ModelProvider>,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// The models behind this analyzer.
    pub fn models(&self) -> ModelInfo {
        self.provider.models()
    }

    /// Analyze one request.
    ///
    /// Blank text is rejected with [`PulseError::Validation`] before any model
    /// call. A failure in either model call fails the whole request; no
    /// partial response is produced.
    pub async fn analyze(&self, request: &AnalysisRequest) -> PulseResult<AnalysisResponse> {
        let span = tracing::info_span!("analysis", request_id = %Uuid::new_v4());
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &AnalysisRequest) -> PulseResult<AnalysisResponse> {
        let mut stage = AnalysisStage::Idle;
        debug!(%stage, chars = request.text.chars().count(), "Analysis requested");

        stage = AnalysisStage::Validating;
        debug!(%stage);
        if let Err(e) = validate(request) {
            stage = AnalysisStage::Rejected;
            info!(%stage, kind = e.kind(), "Input rejected");
            return Err(e);
        }

        stage = AnalysisStage::Scoring;
        debug!(%stage);
        let scored = self.score(&request.text).await;
        let (sentiment, entities) = match scored {
            Ok(raw) => raw,
            Err(e) => {
                stage = AnalysisStage::Rejected;
                warn!(%stage, kind = e.kind(), error = %e, "Model call failed");
                return Err(e);
            }
        };

        stage = AnalysisStage::Shaping;
        debug!(%stage, raw_entities = entities.len());
        let response = match shape(sentiment, entities) {
            Ok(response) => response,
            Err(e) => {
                stage = AnalysisStage::Rejected;
                warn!(%stage, kind = e.kind(), error = %e, "Model output rejected");
                return Err(e);
            }
        };

        stage = AnalysisStage::Done;
        info!(
            %stage,
            label = %response.sentiment.label,
            confidence = response.sentiment.confidence,
            entities = response.entities.len(),
            "Analysis complete"
        );
        Ok(response)
    }

    /// Sentiment first, then entities. The order is fixed.
    async fn score(&self, text: &str) -> PulseResult<(SentimentResult, Vec<EntityMention>)> {
        let sentiment = self.provider.classify_sentiment(text).await?;
        let entities = self.provider.extract_entities(text).await?;
        Ok((sentiment, entities))
    }
}

/// Reject text that is empty after trimming.
pub fn validate(request: &AnalysisRequest) -> PulseResult<()> {
    if request.is_blank() {
        return Err(PulseError::validation(EMPTY_INPUT_MESSAGE));
    }
    Ok(())
}

fn shape(
    mut sentiment: SentimentResult,
    entities: Vec<EntityMention>,
) -> PulseResult<AnalysisResponse> {
    sentiment.confidence = clamp_confidence(sentiment.confidence)?;
    let entities = shape_entities(entities)?;
    Ok(AnalysisResponse { sentiment, entities })
}

/// Order mentions by first occurrence and drop overlapping spans.
///
/// On overlap the earlier-starting mention wins; at equal starts the longer
/// one wins.
pub fn shape_entities(mut entities: Vec<EntityMention>) -> PulseResult<Vec<EntityMention>> {
    for entity in &mut entities {
        entity.confidence = clamp_confidence(entity.confidence)?;
    }

    entities.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut shaped: Vec<EntityMention> = Vec::with_capacity(entities.len());
    for entity in entities {
        if entity.is_empty() || entity.surface_form.trim().is_empty() {
            continue;
        }
        // Kept spans are disjoint and sorted, so only the last can overlap.
        if shaped.last().is_some_and(|last| last.overlaps(&entity)) {
            debug!(surface = %entity.surface_form, "Dropping overlapping mention");
            continue;
        }
        shaped.push(entity);
    }

    Ok(shaped)
}

fn clamp_confidence(value: f32) -> PulseResult<f32> {
    if !value.is_finite() {
        return Err(PulseError::inference(format!(
            "model returned a non-finite confidence ({})",
            value
        )));
    }
    Ok(value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Keyword-driven stub with call recording.
    struct StubProvider {
        calls: Mutex<Vec<&'static str>>,
        sentiment_calls: AtomicUsize,
        fail_entities: bool,
        fail_sentiment: Option<PulseError>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                sentiment_calls: AtomicUsize::new(0),
                fail_entities: false,
                fail_sentiment: None,
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelProvider for StubProvider {
        async fn classify_sentiment(&self, text: &str) -> PulseResult<SentimentResult> {
            self.calls.lock().unwrap().push("sentiment");
            self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(e) = &self.fail_sentiment {
                return Err(e.clone());
            }
            if text.contains("love") {
                Ok(SentimentResult::new("POSITIVE", 0.9998))
            } else {
                Ok(SentimentResult::new("NEGATIVE", 0.9971))
            }
        }

        async fn extract_entities(&self, text: &str) -> PulseResult<Vec<EntityMention>> {
            self.calls.lock().unwrap().push("entities");
            if self.fail_entities {
                return Err(PulseError::inference("token classification crashed"));
            }
            let mut found = Vec::new();
            for (word, category) in [("Mumbai", "LOC"), ("JioCinema", "ORG")] {
                if let Some(start) = text.find(word) {
                    found.push(EntityMention {
                        surface_form: word.to_string(),
                        category: category.to_string(),
                        confidence: 0.98,
                        start,
                        end: start + word.len(),
                    });
                }
            }
            Ok(found)
        }

        fn models(&self) -> ModelInfo {
            ModelInfo {
                sentiment_model: "stub-sentiment".to_string(),
                ner_model: "stub-ner".to_string(),
            }
        }
    }

    fn mention(surface: &str, start: usize, confidence: f32) -> EntityMention {
        EntityMention {
            surface_form: surface.to_string(),
            category: "ORG".to_string(),
            confidence,
            start,
            end: start + surface.len(),
        }
    }

    #[tokio::test]
    async fn test_positive_sample() {
        let provider = Arc::new(StubProvider::new());
        let analyzer = Analyzer::new(provider.clone());

        let text = "I absolutely love the new features in JioCinema! The streaming quality is fantastic.";
        let response = analyzer.analyze(&AnalysisRequest::new(text)).await.unwrap();

        assert_eq!(response.sentiment.label, "POSITIVE");
        assert!(response.sentiment.confidence > 0.5);
        assert_eq!(response.entities.len(), 1);
        assert_eq!(response.entities[0].surface_form, "JioCinema");
        assert_eq!(response.entities[0].category, "ORG");
        assert_eq!(provider.calls(), vec!["sentiment", "entities"]);
    }

    #[tokio::test]
    async fn test_negative_sample_without_entities() {
        let analyzer = Analyzer::new(Arc::new(StubProvider::new()));

        let response = analyzer
            .analyze(&AnalysisRequest::new("Really frustrated with the server downtime yesterday."))
            .await
            .unwrap();

        assert_eq!(response.sentiment.label, "NEGATIVE");
        assert!(response.sentiment.confidence > 0.5);
        assert!(!response.has_entities());
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_provider() {
        let provider = Arc::new(StubProvider::new());
        let analyzer = Analyzer::new(provider.clone());

        for text in ["", "   ", "\n\t  \n"] {
            let err = analyzer.analyze(&AnalysisRequest::new(text)).await.unwrap_err();
            assert_eq!(err, PulseError::validation(EMPTY_INPUT_MESSAGE));
        }

        assert!(provider.calls().is_empty());
        assert_eq!(provider.sentiment_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_entity_failure_fails_whole_request() {
        let mut stub = StubProvider::new();
        stub.fail_entities = true;
        let provider = Arc::new(stub);
        let analyzer = Analyzer::new(provider.clone());

        let err = analyzer
            .analyze(&AnalysisRequest::new("I love JioCinema"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "inference");
        assert_eq!(provider.calls(), vec!["sentiment", "entities"]);
    }

    #[tokio::test]
    async fn test_sentiment_failure_skips_entities() {
        let mut stub = StubProvider::new();
        stub.fail_sentiment = Some(PulseError::model_unavailable("sentiment pipeline not loaded"));
        let provider = Arc::new(stub);
        let analyzer = Analyzer::new(provider.clone());

        let err = analyzer
            .analyze(&AnalysisRequest::new("anything"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "model_unavailable");
        assert_eq!(provider.calls(), vec!["sentiment"]);
    }

    #[tokio::test]
    async fn test_identical_input_identical_response() {
        let analyzer = Analyzer::new(Arc::new(StubProvider::new()));
        let request = AnalysisRequest::new("I love watching in Mumbai on JioCinema");

        let first = analyzer.analyze(&request).await.unwrap();
        let second = analyzer.analyze(&request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_entities_in_reading_order() {
        let analyzer = Analyzer::new(Arc::new(StubProvider::new()));
        let text = "I love watching in Mumbai on JioCinema";

        let response = analyzer.analyze(&AnalysisRequest::new(text)).await.unwrap();
        let surfaces: Vec<&str> = response.entities.iter().map(|e| e.surface_form.as_str()).collect();

        assert_eq!(surfaces, vec!["Mumbai", "JioCinema"]);
        for entity in &response.entities {
            assert_eq!(&text[entity.start..entity.end], entity.surface_form);
        }
    }

    #[test]
    fn test_shape_sorts_and_drops_overlaps() {
        let entities = vec![
            mention("Cinema", 3, 0.7),
            mention("Jio", 0, 0.8),
            mention("JioCinema", 0, 0.9),
            mention("Mumbai", 13, 0.95),
        ];

        let shaped = shape_entities(entities).unwrap();
        let surfaces: Vec<&str> = shaped.iter().map(|e| e.surface_form.as_str()).collect();

        assert_eq!(surfaces, vec!["JioCinema", "Mumbai"]);
    }

    #[test]
    fn test_shape_clamps_confidence() {
        let shaped = shape_entities(vec![mention("Jio", 0, 1.0004)]).unwrap();
        assert_eq!(shaped[0].confidence, 1.0);
    }

    #[test]
    fn test_shape_rejects_nan_confidence() {
        let err = shape_entities(vec![mention("Jio", 0, f32::NAN)]).unwrap_err();
        assert_eq!(err.kind(), "inference");
    }

    #[test]
    fn test_shape_drops_empty_spans() {
        let empty = EntityMention {
            surface_form: String::new(),
            category: "MISC".to_string(),
            confidence: 0.5,
            start: 4,
            end: 4,
        };
        assert!(shape_entities(vec![empty]).unwrap().is_empty());
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(AnalysisStage::Scoring.to_string(), "scoring");
        assert_eq!(AnalysisStage::Rejected.as_str(), "rejected");
    }
}
