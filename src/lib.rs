//! TradeRiskAnalyzer Library
//!
//! Classifies trades into risk tiers, either in-line or through an
//! asynchronous job pipeline with a bounded queue and batch workers.

pub mod analysis;
pub mod api;
pub mod common;
pub mod config;
pub mod risk;

// Re-export commonly used types
pub use analysis::{
    AcceptedJob, AnalysisPipeline, AnalysisReport, BatchWorker, ChannelWorkQueue, IngestionService,
    InputValidator, JobStatus, JobStore, StatusPayload, TradeInput, WorkerStats,
};
pub use api::{create_app, serve, AppState};
pub use common::errors::{AnalysisError, Result};
pub use common::types::{CategorySummary, FieldError, QueueItem, RiskCategory, RiskSummary, Trade};
pub use config::types::AppConfig;
pub use risk::{RiskClassifier, RiskRule, RiskSummaryService};
