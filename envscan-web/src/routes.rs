use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use envscan_core::{
    AnalysisError, Analyzer, Classification, EnvironmentalRecord,
    present::{heatmap_json, map_fragment},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub weather_data: EnvironmentalRecord,
    pub classification: Classification,
    pub map_html: String,
    /// Plotly figure, itself serialized as JSON.
    pub heatmap_data: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn analyze(
    State(state): State<AppState>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Response {
    let location = match form {
        Ok(Form(form)) => form.location.unwrap_or_default(),
        Err(rejection) => {
            warn!(error = %rejection, "unreadable analyze form");
            String::new()
        }
    };

    match state.analyzer.analyze(&location).await {
        Ok(analysis) => {
            info!(place = %analysis.place, coords = %analysis.coordinates, "analysis complete");

            Json(AnalyzeResponse {
                classification: Classification::of(&analysis.record),
                map_html: map_fragment(analysis.coordinates, &analysis.record),
                heatmap_data: heatmap_json(&analysis.record),
                weather_data: analysis.record,
            })
            .into_response()
        }
        Err(err) => {
            warn!(error = %err, "analysis failed");
            (status_for(&err), Json(json!({ "error": err.user_message() }))).into_response()
        }
    }
}

fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::MissingLocation => StatusCode::BAD_REQUEST,
        AnalysisError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
        e if e.is_fetch_failure() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
