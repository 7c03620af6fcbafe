//! Asynchronous trade analysis pipeline
//!
//! Admission validates a batch, registers a job in the [`JobStore`] and
//! enqueues one item per trade. [`BatchWorker`]s drain the queue, classify
//! each trade and fold the result into its job until it completes.

pub mod ingestion;
pub mod job_id;
pub mod job_state;
pub mod job_store;
pub mod pipeline;
pub mod queue;
pub mod report;
pub mod validator;
pub mod worker;

pub use ingestion::{AcceptedJob, IngestionService};
pub use job_id::UuidJobIdGenerator;
pub use job_state::{JobState, SharedJobState};
pub use job_store::JobStore;
pub use pipeline::AnalysisPipeline;
pub use queue::{ChannelWorkQueue, WorkReceiver};
pub use report::{
    AnalysisReport, CategorySummaryView, ClassificationReport, ErrorBody, JobProgress, JobStatus,
    StatusBody, StatusPayload,
};
pub use validator::{InputValidator, TradeInput, ValidationOutcome};
pub use worker::{BatchWorker, WorkerStats};
