//! Shared HTTP state

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::analysis::{AnalysisPipeline, IngestionService, InputValidator, JobStore};
use crate::common::errors::{AnalysisError, Result};
use crate::config::AppConfig;
use crate::risk::{RiskClassifier, RiskSummaryService};

/// State handed to every handler
///
/// Holds references into the pipeline; it owns no job data itself.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
    pub ingestion: IngestionService,
    pub classifier: Arc<RiskClassifier>,
    pub summary_service: Arc<RiskSummaryService>,
    pub validator: Arc<InputValidator>,
    /// Base for absolute status links, always ending in `/`
    pub public_base_url: Url,
    /// Cancelled on shutdown; admissions in flight observe it
    pub shutdown: CancellationToken,
    pub queue_capacity: usize,
}

impl AppState {
    pub fn new(
        pipeline: &AnalysisPipeline,
        config: &AppConfig,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        Ok(Self {
            store: Arc::clone(&pipeline.store),
            ingestion: pipeline.ingestion.clone(),
            classifier: Arc::clone(&pipeline.classifier),
            summary_service: Arc::clone(&pipeline.summary_service),
            validator: Arc::clone(&pipeline.validator),
            public_base_url: parse_base_url(&config.server.public_base_url)?,
            shutdown,
            queue_capacity: pipeline.queue_capacity,
        })
    }

    /// Absolute URL of a job's status route
    pub fn status_url(&self, job_id: &str) -> Result<Url> {
        self.public_base_url
            .join(&format!("api/trades/analyze/{}", job_id))
            .map_err(|e| AnalysisError::Internal(format!("cannot build status url: {}", e)))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| {
        AnalysisError::Configuration(format!("server.public_base_url is invalid: {}", e))
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
