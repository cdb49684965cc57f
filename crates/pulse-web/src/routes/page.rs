//! HTML page handlers.
//!
//! The page is rendered server-side. Picking a sample reloads the page with
//! the sample text in the editor; submitting the editor posts the text back
//! and renders the outcome in place.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use pulse_core::{AnalysisRequest, SampleSource};
use serde::Deserialize;
use tracing::debug;

use super::api::status_for;
use crate::state::AppState;
use crate::view::{ChartView, ResultView, SampleOption, NO_ENTITIES_MESSAGE};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    samples: Vec<SampleOption>,
    source: &'static str,
    text: String,
    warning: Option<String>,
    error: Option<String>,
    result: Option<ResultView>,
    chart: Option<ChartView>,
    no_entities: &'static str,
    sentiment_model: String,
    ner_model: String,
}

impl IndexTemplate {
    fn new(state: &AppState, source: SampleSource, text: String) -> Self {
        let models = state.analyzer.models();
        Self {
            samples: SampleOption::all(source),
            source: source.slug(),
            text,
            warning: None,
            error: None,
            result: None,
            chart: None,
            no_entities: NO_ENTITIES_MESSAGE,
            sentiment_model: models.sentiment_model,
            ner_model: models.ner_model,
        }
    }
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub source: Option<String>,
}

#[derive(Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub text: String,
}

/// Unknown slugs fall back to direct input.
fn resolve_source(slug: Option<&str>) -> SampleSource {
    let slug = slug.unwrap_or_default();
    SampleSource::from_slug(slug).unwrap_or_else(|| {
        debug!(slug, "Unknown sample source, using direct input");
        SampleSource::DirectInput
    })
}

fn render(status: StatusCode, template: IndexTemplate) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}

/// GET / - Render the page, optionally preloaded with a sample.
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let source = resolve_source(query.source.as_deref());
    let text = source.text().unwrap_or_default().to_string();
    render(StatusCode::OK, IndexTemplate::new(&state, source, text))
}

/// POST /analyze - Analyze the submitted text and render the outcome.
pub async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Response {
    let source = resolve_source(Some(&form.source));
    let request = AnalysisRequest::new(form.text.clone());
    let mut page = IndexTemplate::new(&state, source, form.text);

    let status = match state.analyzer.analyze(&request).await {
        Ok(response) => {
            page.result = Some(ResultView::from_response(&response));
            page.chart = Some(ChartView::random());
            StatusCode::OK
        }
        Err(e) if e.is_user_error() => {
            page.warning = Some(e.to_string());
            status_for(&e)
        }
        Err(e) => {
            page.error = Some(e.to_string());
            status_for(&e)
        }
    };

    render(status, page)
}
