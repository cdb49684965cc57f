//! Centralized error types for SocialPulse.

use thiserror::Error;

/// Main error type for analysis operations.
///
/// Every variant is terminal for the request that produced it. None of them
/// trigger an automatic retry; a new user action is the only retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PulseError {
    /// Empty or whitespace-only input. No model was invoked.
    #[error("{0}")]
    Validation(String),

    /// A pretrained pipeline could not be loaded.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// A loaded pipeline failed while scoring the given input.
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for analysis operations.
pub type PulseResult<T> = Result<T, PulseError>;

impl PulseError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a model unavailable error.
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable machine-readable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::Inference(_) => "inference",
            Self::Config(_) => "config",
        }
    }

    /// Whether the error was caused by the user's input rather than the models.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
