//! `cantine serve` command: HTTP ingestion endpoint for uploaded
//! sheets.
//!
//! The dashboard posts the sheet text to `/api/menus/ingest` and shows
//! either the imported plan or the aggregated row report.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use cantine_core::{Locale, WeeklyDayPlan, ingest_rows};

use crate::decode;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    /// A structurally unusable upload (decode failure).
    fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    /// A decodable sheet the engine rejected (row errors, empty sheet).
    fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct IngestParams {
    /// Weekday-name locale override for this upload.
    locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
struct IngestResponse {
    days: Vec<WeeklyDayPlan>,
    count: usize,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct AppState {
    default_locale: Locale,
}

pub fn build_router(default_locale: Locale) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/menus/ingest", post(ingest_sheet))
        .layer(CorsLayer::permissive())
        .with_state(AppState { default_locale })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(default_locale: Locale, bind: &str, port: u16) -> Result<()> {
    let app = build_router(default_locale);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("cantine serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("cantine serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\
<html><head><title>cantine</title></head><body>\
<h1>cantine</h1>\
<p>POST a CSV menu sheet to <code>/api/menus/ingest</code>.</p>\
<p><a href=\"/api/health\">/api/health</a></p>\
</body></html>",
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ingest_sheet(
    State(state): State<AppState>,
    Query(params): Query<IngestParams>,
    body: String,
) -> Result<Json<IngestResponse>, AppError> {
    let rows = decode::decode_csv(&body).map_err(|e| {
        AppError::bad_request(format!("failed to process the uploaded sheet: {e}"))
    })?;

    let locale = params.locale.unwrap_or(state.default_locale);
    let days =
        ingest_rows(&rows, locale.namer()).map_err(|e| AppError::unprocessable(e.to_string()))?;

    let count = days.len();
    Ok(Json(IngestResponse { days, count }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
