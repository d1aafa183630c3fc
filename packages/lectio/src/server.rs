//! HTTP surface: date form, booklet and PDF generation, health check.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::Config;
use crate::error::LectioError;
use crate::pdf::PdfRenderer;
use crate::pipeline;
use crate::providers::LlmProvider;
use crate::scrape::FetchReadings;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn LlmProvider>,
    pub fetcher: Arc<dyn FetchReadings>,
    pub pdf: Arc<dyn PdfRenderer>,
    pub config: Arc<Config>,
    /// Date pre-filled in the form and used when a request omits one.
    pub default_date: Option<String>,
}

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/run", post(run_booklet))
        .route("/pdf", post(run_pdf))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Today's date in ISO form, local time.
pub fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

#[derive(Debug, Deserialize)]
struct RunForm {
    date: Option<String>,
}

impl AppState {
    fn resolve_date(&self, submitted: Option<String>) -> String {
        submitted
            .filter(|date| !date.is_empty())
            .or_else(|| self.default_date.clone())
            .unwrap_or_else(today)
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let value = state.default_date.clone().unwrap_or_else(today);
    Html(format!(
        "<form method='post' action='/run'>\
         <input type='date' name='date' value='{value}'>\
         <button type='submit'>Generate</button>\
         </form>"
    ))
}

async fn run_booklet(
    State(state): State<AppState>,
    Form(form): Form<RunForm>,
) -> Result<Response, ApiError> {
    let date = state.resolve_date(form.date);
    let fetched = state.fetcher.fetch(&date).await?;
    let html = pipeline::run(
        &fetched.html,
        &date,
        Some(&fetched.url),
        state.provider.as_ref(),
        &state.config,
    )
    .await?;

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}

async fn run_pdf(
    State(state): State<AppState>,
    Form(form): Form<RunForm>,
) -> Result<Response, ApiError> {
    let date = state.resolve_date(form.date);
    let fetched = state.fetcher.fetch(&date).await?;
    let html = pipeline::run(
        &fetched.html,
        &date,
        Some(&fetched.url),
        state.provider.as_ref(),
        &state.config,
    )
    .await?;
    let pdf = state.pdf.render(&html).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/pdf")],
        pdf,
    )
        .into_response())
}

async fn health() -> &'static str {
    "OK"
}

/// Error wrapper mapping pipeline failures to HTTP statuses.
struct ApiError(LectioError);

impl From<LectioError> for ApiError {
    fn from(err: LectioError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LectioError::Fetch { .. }
            | LectioError::Status { .. }
            | LectioError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(error = %self.0, status = %status, "request failed");
        (status, self.0.to_string()).into_response()
    }
}
