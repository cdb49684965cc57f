//! Display formatting and view models.
//!
//! Confidence stays a raw `f32` until it reaches this module.

use pulse_core::{AnalysisResponse, EntityMention, Polarity, SampleSource, SentimentResult};

use crate::trend::{self, TrendChart};

/// Shown in place of the entity table when nothing was recognized.
pub const NO_ENTITIES_MESSAGE: &str = "No specific entities (People, Orgs, Locations) detected.";

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 220.0;

/// Sentiment confidence as a percentage with two decimals, e.g. `99.87%`.
pub fn percent(confidence: f32) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Entity confidence with two decimals, e.g. `0.99`.
pub fn two_decimals(confidence: f32) -> String {
    format!("{:.2}", confidence)
}

/// CSS class for the sentiment badge.
pub fn tone(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Positive => "positive",
        Polarity::Negative => "negative",
        Polarity::Neutral | Polarity::Unknown => "neutral",
    }
}

pub struct SampleOption {
    pub slug: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

impl SampleOption {
    pub fn all(selected: SampleSource) -> Vec<Self> {
        SampleSource::ALL
            .iter()
            .map(|s| Self {
                slug: s.slug(),
                name: s.display_name(),
                selected: *s == selected,
            })
            .collect()
    }
}

pub struct SentimentView {
    pub label: String,
    pub percent: String,
    pub tone: &'static str,
}

impl SentimentView {
    pub fn from_result(result: &SentimentResult) -> Self {
        Self {
            label: result.label.clone(),
            percent: percent(result.confidence),
            tone: tone(result.polarity()),
        }
    }
}

/// One row of the entity table.
pub struct EntityRow {
    pub name: String,
    pub category: String,
    pub confidence: String,
}

impl EntityRow {
    pub fn from_mention(mention: &EntityMention) -> Self {
        Self {
            name: mention.surface_form.clone(),
            category: mention.category.clone(),
            confidence: two_decimals(mention.confidence),
        }
    }
}

pub struct ResultView {
    pub sentiment: SentimentView,
    pub entities: Vec<EntityRow>,
}

impl ResultView {
    pub fn from_response(response: &AnalysisResponse) -> Self {
        Self {
            sentiment: SentimentView::from_result(&response.sentiment),
            entities: response.entities.iter().map(EntityRow::from_mention).collect(),
        }
    }
}

pub struct LineView {
    pub name: &'static str,
    pub color: &'static str,
    pub points: String,
}

pub struct ChartView {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub zero_y: String,
    pub lines: Vec<LineView>,
}

impl ChartView {
    pub fn from_chart(chart: &TrendChart) -> Self {
        Self {
            title: trend::TITLE,
            width: CHART_WIDTH as u32,
            height: CHART_HEIGHT as u32,
            zero_y: format!("{:.1}", chart.zero_line(CHART_HEIGHT)),
            lines: chart
                .series
                .iter()
                .map(|s| LineView {
                    name: s.name,
                    color: s.color,
                    points: chart.polyline(s, CHART_WIDTH, CHART_HEIGHT),
                })
                .collect(),
        }
    }

    pub fn random() -> Self {
        Self::from_chart(&TrendChart::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.99876), "99.88%");
        assert_eq!(percent(1.0), "100.00%");
        assert_eq!(percent(0.0), "0.00%");
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(two_decimals(0.9981), "1.00");
        assert_eq!(two_decimals(0.456), "0.46");
    }

    #[test]
    fn test_result_view() {
        let response = AnalysisResponse {
            sentiment: SentimentResult::new("NEGATIVE", 0.9993),
            entities: vec![EntityMention {
                surface_form: "JioCinema".into(),
                category: "ORG".into(),
                confidence: 0.971,
                start: 0,
                end: 9,
            }],
        };

        let view = ResultView::from_response(&response);
        assert_eq!(view.sentiment.percent, "99.93%");
        assert_eq!(view.sentiment.tone, "negative");
        assert_eq!(view.entities[0].name, "JioCinema");
        assert_eq!(view.entities[0].confidence, "0.97");
    }

    #[test]
    fn test_sample_options_mark_selection() {
        let options = SampleOption::all(SampleSource::SampleTweet2);
        let selected: Vec<&str> = options.iter().filter(|o| o.selected).map(|o| o.slug).collect();
        assert_eq!(selected, vec!["sample-tweet-2"]);
    }
}
