//! Analysis domain models.

use serde::{Deserialize, Serialize};

/// Text submitted for analysis by a single user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// True when the text has no content after trimming.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Sentiment polarity derived from a model label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl Polarity {
    /// Parse a model label. Matching is case-insensitive.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "pos" | "label_1" => Self::Positive,
            "negative" | "neg" | "label_0" => Self::Negative,
            "neutral" | "neu" => Self::Neutral,
            _ => Self::Unknown,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
        }
    }
}

/// Sentiment label and the model's own confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Label as emitted by the model (vocabulary is model-defined).
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl SentimentResult {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_label(&self.label)
    }
}

/// A named entity recognized in the request text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    /// Exact substring of the request text.
    pub surface_form: String,
    /// Entity class, e.g. `PER`, `ORG`, `LOC`, `MISC`.
    pub category: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Byte offset where the mention starts.
    pub start: usize,
    /// Byte offset one past the end of the mention.
    pub end: usize,
}

impl EntityMention {
    /// True when the two spans share at least one byte.
    pub fn overlaps(&self, other: &EntityMention) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Complete result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub sentiment: SentimentResult,
    /// Mentions in reading order. May be empty.
    pub entities: Vec<EntityMention>,
}

impl AnalysisResponse {
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(start: usize, end: usize) -> EntityMention {
        EntityMention {
            surface_form: "x".repeat(end - start),
            category: "ORG".to_string(),
            confidence: 0.9,
            start,
            end,
        }
    }

    #[test]
    fn test_blank_request() {
        assert!(AnalysisRequest::new("").is_blank());
        assert!(AnalysisRequest::new(" \n\t ").is_blank());
        assert!(!AnalysisRequest::new("  hi ").is_blank());
    }

    #[test]
    fn test_polarity_from_label() {
        assert_eq!(Polarity::from_label("POSITIVE"), Polarity::Positive);
        assert_eq!(Polarity::from_label("negative"), Polarity::Negative);
        assert_eq!(Polarity::from_label("LABEL_1"), Polarity::Positive);
        assert_eq!(Polarity::from_label("Neutral"), Polarity::Neutral);
        assert_eq!(Polarity::from_label("joy"), Polarity::Unknown);
    }

    #[test]
    fn test_sentiment_keeps_raw_label() {
        let result = SentimentResult::new("POSITIVE", 0.99);
        assert_eq!(result.label, "POSITIVE");
        assert_eq!(result.polarity(), Polarity::Positive);
    }

    #[test]
    fn test_overlap() {
        assert!(mention(0, 5).overlaps(&mention(4, 8)));
        assert!(!mention(0, 5).overlaps(&mention(5, 8)));
        assert!(mention(2, 3).overlaps(&mention(0, 10)));
    }

    #[test]
    fn test_response_serializes_field_names() {
        let response = AnalysisResponse {
            sentiment: SentimentResult::new("NEGATIVE", 0.97),
            entities: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sentiment"]["label"], "NEGATIVE");
        assert!(json["entities"].as_array().unwrap().is_empty());
    }
}
