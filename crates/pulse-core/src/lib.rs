//! SocialPulse Core Library
//!
//! Domain model, error taxonomy and the analysis orchestrator for the
//! SocialPulse text analyzer.

pub mod analysis;
pub mod error;
pub mod provider;
pub mod samples;

pub use analysis::model::{
    AnalysisRequest, AnalysisResponse, EntityMention, Polarity, SentimentResult,
};
pub use analysis::{AnalysisStage, Analyzer};
pub use error::{PulseError, PulseResult};
pub use provider::{ModelInfo, ModelProvider};
pub use samples::SampleSource;
