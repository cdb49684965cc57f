//! Wire shapes of the pipeline API.

use serde::{Deserialize, Serialize};

/// Request body shared by both pipelines.
#[derive(Serialize)]
pub(crate) struct PipelineRequest<'a> {
    pub inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<TokenParameters>,
}

#[derive(Serialize)]
pub(crate) struct TokenParameters {
    pub aggregation_strategy: &'static str,
}

/// Error body returned with non-success statuses.
#[derive(Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f32>,
}

/// One `{label, score}` pair from text classification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Text classification answers `[[...]]` for a single input on some
/// deployments and `[...]` on others.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassificationOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationOutput {
    pub fn into_scores(self) -> Vec<LabelScore> {
        match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(scores) => scores,
        }
    }
}

/// One token-classification record.
///
/// Grouped output carries `entity_group`; token-level output carries
/// `entity` with a `B-`/`I-` tag and the token `index`. Offsets count
/// characters, not bytes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub entity_group: Option<String>,
    #[serde(default)]
    pub entity: Option<String>,
    pub score: f32,
    pub word: String,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    #[serde(default)]
    pub index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_classification() {
        let json = r#"[[{"label":"POSITIVE","score":0.9998},{"label":"NEGATIVE","score":0.0002}]]"#;
        let output: ClassificationOutput = serde_json::from_str(json).unwrap();
        let scores = output.into_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].label, "POSITIVE");
    }

    #[test]
    fn test_flat_classification() {
        let json = r#"[{"label":"NEGATIVE","score":0.97}]"#;
        let output: ClassificationOutput = serde_json::from_str(json).unwrap();
        assert_eq!(output.into_scores()[0].label, "NEGATIVE");
    }

    #[test]
    fn test_grouped_entity() {
        let json = r#"{"entity_group":"ORG","score":0.998,"word":"JioCinema","start":38,"end":47}"#;
        let entity: RawEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.entity_group.as_deref(), Some("ORG"));
        assert_eq!(entity.start, Some(38));
        assert!(entity.entity.is_none());
    }

    #[test]
    fn test_token_entity() {
        let json = r###"{"entity":"I-ORG","score":0.99,"index":9,"word":"##ema","start":44,"end":47}"###;
        let entity: RawEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.entity.as_deref(), Some("I-ORG"));
        assert_eq!(entity.index, Some(9));
    }

    #[test]
    fn test_request_body() {
        let body = PipelineRequest {
            inputs: "hi",
            parameters: Some(TokenParameters { aggregation_strategy: "simple" }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["parameters"]["aggregation_strategy"], "simple");

        let bare = serde_json::to_value(PipelineRequest { inputs: "hi", parameters: None }).unwrap();
        assert!(bare.get("parameters").is_none());
    }
}
