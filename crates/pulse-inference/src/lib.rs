//! # Pulse Inference
//!
//! Hosted pretrained pipelines (Hugging Face Inference API) behind the
//! `ModelProvider` contract.
//!
//! Raw pipeline output is decoded into private wire shapes and mapped to
//! `SentimentResult` / `EntityMention` at this boundary.

pub mod client;
pub mod config;
pub mod error;
pub mod grouping;
pub mod provider;
mod wire;

pub use client::InferenceClient;
pub use config::InferenceConfig;
pub use error::ClientError;
pub use provider::{LoadReport, PipelineProvider};
pub use wire::{LabelScore, RawEntity};
