//! HTTP client for hosted pretrained pipelines.
//!
//! POSTs `{"inputs": ...}` to `<api_url>/<model-id>` and decodes the
//! pipeline-specific JSON answer.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::InferenceConfig;
use crate::error::ClientError;
use crate::wire::{
    ApiErrorBody, ClassificationOutput, LabelScore, PipelineRequest, RawEntity, TokenParameters,
};

/// Aggregation strategy that merges sub-token predictions into whole words.
const AGGREGATION_STRATEGY: &str = "simple";

/// Inference API client.
#[derive(Clone)]
pub struct InferenceClient {
    config: InferenceConfig,
    client: reqwest::Client,
}

impl InferenceClient {
    /// Create a client for the given configuration.
    pub fn new(config: InferenceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run text classification and return every label with its score.
    pub async fn text_classification(
        &self,
        model: &str,
        text: &str,
    ) -> Result<Vec<LabelScore>, ClientError> {
        let request = PipelineRequest {
            inputs: text,
            parameters: None,
        };

        let output: ClassificationOutput = self.post(model, &request).await?;
        let scores = output.into_scores();
        if scores.is_empty() {
            return Err(ClientError::EmptyOutput);
        }

        debug!(model, labels = scores.len(), "Text classification finished");
        Ok(scores)
    }

    /// Run token classification with grouped output.
    pub async fn token_classification(
        &self,
        model: &str,
        text: &str,
    ) -> Result<Vec<RawEntity>, ClientError> {
        let request = PipelineRequest {
            inputs: text,
            parameters: Some(TokenParameters {
                aggregation_strategy: AGGREGATION_STRATEGY,
            }),
        };

        let entities: Vec<RawEntity> = self.post(model, &request).await?;

        debug!(model, entities = entities.len(), "Token classification finished");
        Ok(entities)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        model: &str,
        request: &PipelineRequest<'_>,
    ) -> Result<T, ClientError> {
        let mut builder = self.client.post(self.config.model_url(model)).json(request);

        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }
        if self.config.wait_for_model {
            builder = builder.header("x-wait-for-model", "true");
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(model, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn error_from_body(model: &str, status: StatusCode, body: &str) -> ClientError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();

    match parsed {
        Some(err) if status == StatusCode::SERVICE_UNAVAILABLE && err.error.contains("loading") => {
            ClientError::ModelLoading {
                model: model.to_string(),
                estimated_time: err.estimated_time,
            }
        }
        Some(err) => ClientError::Status {
            status: status.as_u16(),
            message: err.error,
        },
        None => ClientError::Status {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        },
    }
}
