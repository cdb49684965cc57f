//! Inference configuration.
//!
//! Defaults target the hosted Hugging Face Inference API. Every field can be
//! overridden through environment variables.

use std::fmt;
use std::time::Duration;

use pulse_core::{PulseError, PulseResult};

/// Default inference API base URL. Model ids are appended as path segments.
pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Default sentiment model (binary polarity, `POSITIVE` / `NEGATIVE`).
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Default NER model (`PER`, `ORG`, `LOC`, `MISC`).
pub const DEFAULT_NER_MODEL: &str = "dbmdz/bert-large-cased-finetuned-conll03-english";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_API_URL: &str = "PULSE_API_URL";
pub const ENV_TOKEN: &str = "HF_TOKEN";
pub const ENV_SENTIMENT_MODEL: &str = "PULSE_SENTIMENT_MODEL";
pub const ENV_NER_MODEL: &str = "PULSE_NER_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "PULSE_TIMEOUT_SECS";

/// Settings for the hosted pipelines.
#[derive(Clone)]
pub struct InferenceConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub sentiment_model: String,
    pub ner_model: String,
    pub timeout: Duration,
    /// Ask the API to block until a cold model is loaded instead of answering 503.
    pub wait_for_model: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            ner_model: DEFAULT_NER_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            wait_for_model: true,
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("sentiment_model", &self.sentiment_model)
            .field("ner_model", &self.ner_model)
            .field("timeout", &self.timeout)
            .field("wait_for_model", &self.wait_for_model)
            .finish()
    }
}

impl InferenceConfig {
    /// Build from a variable lookup on top of the defaults.
    ///
    /// Keys are the `ENV_*` names. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> PulseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_url = url;
        }
        config.token = get(ENV_TOKEN);
        if let Some(model) = get(ENV_SENTIMENT_MODEL) {
            config.sentiment_model = model;
        }
        if let Some(model) = get(ENV_NER_MODEL) {
            config.ner_model = model;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                PulseError::config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> PulseResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(PulseError::config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.sentiment_model.trim().is_empty() || self.ner_model.trim().is_empty() {
            return Err(PulseError::config("model ids must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(PulseError::config("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Endpoint for a model id.
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), model.trim_matches('/'))
    }
}
