//! Serializable views of classification results and job status

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::common::types::{CategorySummary, RiskCategory, RiskSummary};

/// Public view of a category summary (top value is never exposed)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryView {
    pub count: u64,
    /// Exact decimal rendered as a JSON number
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_value: Decimal,
    pub top_client: Option<String>,
}

impl From<&CategorySummary> for CategorySummaryView {
    fn from(summary: &CategorySummary) -> Self {
        Self {
            count: summary.count,
            total_value: summary.total_value,
            top_client: summary.top_client.clone(),
        }
    }
}

/// Categories only, as returned by the classify endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub categories: Vec<RiskCategory>,
}

/// Full analysis result: categories in processing order plus per-category summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub categories: Vec<RiskCategory>,
    pub summary: BTreeMap<RiskCategory, CategorySummaryView>,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn new(categories: Vec<RiskCategory>, summary: &RiskSummary) -> Self {
        Self {
            categories,
            summary: summary
                .by_category
                .iter()
                .map(|(category, s)| (*category, CategorySummaryView::from(s)))
                .collect(),
            processing_time_ms: summary.processing_time_ms,
        }
    }
}

/// Progress of a job that has not completed yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobProgress {
    pub status: &'static str,
    pub processed: u64,
    pub total: u64,
    /// Percentage of trades processed, rounded to two decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
}

impl JobProgress {
    pub const STATUS_PROCESSING: &'static str = "processing";
}

/// Error body `{ "error": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Point-in-time status of a job
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobStatus {
    Processing(JobProgress),
    Completed(AnalysisReport),
}

impl JobStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobStatus::Completed(_))
    }
}

/// Body of a status lookup, including the not-found case
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusBody {
    Job(JobStatus),
    NotFound(ErrorBody),
}

/// Status lookup result: whether the job exists, the body, and the HTTP status to answer with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPayload {
    pub found: bool,
    pub body: StatusBody,
    pub status_code: u16,
}

impl StatusPayload {
    pub const NOT_FOUND_MESSAGE: &'static str = "job not found";

    pub fn not_found() -> Self {
        Self {
            found: false,
            body: StatusBody::NotFound(ErrorBody::new(Self::NOT_FOUND_MESSAGE)),
            status_code: 404,
        }
    }

    pub fn from_status(status: JobStatus) -> Self {
        let status_code = if status.is_completed() { 200 } else { 202 };
        Self {
            found: true,
            body: StatusBody::Job(status),
            status_code,
        }
    }
}
