//! Route handlers under `/api/trades` plus the health check

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use super::error::ApiResult;
use super::state::AppState;
use crate::analysis::{AnalysisReport, ClassificationReport, JobStatus, TradeInput};
use crate::common::errors::AnalysisError;

/// Request body: a JSON array of trades; `null` counts as empty
pub type TradesBody = Result<Json<Option<Vec<TradeInput>>>, JsonRejection>;

/// 202 response for an admitted job
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedJobResponse {
    pub job_id: String,
    pub enqueued: usize,
    pub status_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub queue_capacity: usize,
    pub jobs: usize,
}

fn read_trades(body: TradesBody) -> ApiResult<Vec<TradeInput>> {
    let Json(items) = body?;
    Ok(items.unwrap_or_default())
}

/// POST /api/trades/classify - value and sector rules only
pub async fn classify(
    State(state): State<AppState>,
    body: TradesBody,
) -> ApiResult<Json<ClassificationReport>> {
    let items = read_trades(body)?;
    let trades = state.validator.validate_classification_trades(&items)?;
    let categories = state.classifier.classify_many(&trades)?;
    Ok(Json(ClassificationReport { categories }))
}

/// POST /api/trades/analyze - classify and aggregate in-line
pub async fn analyze(
    State(state): State<AppState>,
    body: TradesBody,
) -> ApiResult<Json<AnalysisReport>> {
    let items = read_trades(body)?;
    let trades = state.validator.validate_trades(&items)?;
    let (categories, summary) = state.summary_service.analyze(&trades)?;
    Ok(Json(AnalysisReport::new(categories, &summary)))
}

/// POST /api/trades/analyze/queue - admit a job for background processing
#[instrument(skip_all)]
pub async fn analyze_queue(
    State(state): State<AppState>,
    body: TradesBody,
) -> ApiResult<(StatusCode, Json<QueuedJobResponse>)> {
    let items = read_trades(body)?;
    let cancel = state.shutdown.child_token();
    let accepted = state.ingestion.ingest(&items, &cancel).await?;
    let status_url = state.status_url(&accepted.job_id)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(QueuedJobResponse {
            job_id: accepted.job_id,
            enqueued: accepted.enqueued_count,
            status_url: status_url.into(),
        }),
    ))
}

/// GET /api/trades/analyze/{job_id} - 202 while processing, 200 once completed
pub async fn analyze_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<(StatusCode, Json<JobStatus>)> {
    let status = state
        .store
        .status(&job_id)
        .ok_or(AnalysisError::JobNotFound(job_id))?;
    let code = if status.is_completed() {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };
    Ok((code, Json(status)))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        queue_capacity: state.queue_capacity,
        jobs: state.store.len(),
    })
}
