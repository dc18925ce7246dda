use crate::infra::{AnalyzeRequest, AppState, AugmentService, TopRequest};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use eq_augs::analysis::{AnalysisReport, CatalogRankingReport};
use eq_augs::error::AppError;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) catalog_items: usize,
    #[serde(flatten)]
    pub(crate) report: AnalysisReport,
}

#[derive(Debug, Serialize)]
pub(crate) struct TopResponse {
    pub(crate) generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) report: CatalogRankingReport,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpansionsResponse {
    pub(crate) catalog_items: usize,
    pub(crate) expansions: Vec<String>,
}

pub(crate) fn augment_router(service: Arc<AugmentService>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/augments/analyze", post(analyze_endpoint))
        .route("/api/v1/augments/top", post(top_endpoint))
        .route("/api/v1/augments/expansions", get(expansions_endpoint))
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analyze_endpoint(
    State(service): State<Arc<AugmentService>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let report = service.analyze(payload)?;
    Ok(Json(AnalyzeResponse {
        generated_at: Utc::now(),
        catalog_items: service.catalog().len(),
        report,
    }))
}

pub(crate) async fn top_endpoint(
    State(service): State<Arc<AugmentService>>,
    Json(payload): Json<TopRequest>,
) -> Result<Json<TopResponse>, AppError> {
    let report = service.top(payload)?;
    Ok(Json(TopResponse {
        generated_at: Utc::now(),
        report,
    }))
}

pub(crate) async fn expansions_endpoint(
    State(service): State<Arc<AugmentService>>,
) -> Json<ExpansionsResponse> {
    let catalog = service.catalog();
    Json(ExpansionsResponse {
        catalog_items: catalog.len(),
        expansions: catalog
            .expansions()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}
