//! Errors raised while talking to the inference API.

use pulse_core::PulseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to reach inference API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model '{model}' is still loading{}", retry_hint(.estimated_time))]
    ModelLoading {
        model: String,
        estimated_time: Option<f32>,
    },

    #[error("Inference API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode pipeline output: {0}")]
    Decode(String),

    #[error("Pipeline returned no output")]
    EmptyOutput,
}

fn retry_hint(estimated_time: &Option<f32>) -> String {
    match estimated_time {
        Some(secs) if secs.is_finite() && *secs > 0.0 => format!(", try again in about {:.0}s", secs),
        _ => String::new(),
    }
}

impl ClientError {
    /// True when the model itself cannot be used right now, as opposed to
    /// failing on this particular input.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::ModelLoading { .. } => true,
            Self::Status { status, .. } => matches!(status, 401 | 403 | 404 | 503),
            Self::Transport(e) => e.is_connect(),
            Self::Decode(_) | Self::EmptyOutput => false,
        }
    }

    /// Map an error from a scoring call into the analysis taxonomy.
    pub fn into_scoring_error(self, model: &str) -> PulseError {
        if self.is_unavailable() {
            PulseError::model_unavailable(format!("{}: {}", model, self))
        } else {
            PulseError::inference(format!("{}: {}", model, self))
        }
    }

    /// Map an error from the one-time load. Every load failure means the
    /// model is unavailable.
    pub fn into_load_error(self, model: &str) -> PulseError {
        PulseError::model_unavailable(format!("{}: {}", model, self))
    }
}
