//! Wiring of the store, queue, classifier and workers

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::ingestion::IngestionService;
use super::job_id::UuidJobIdGenerator;
use super::job_store::JobStore;
use super::queue::{ChannelWorkQueue, WorkReceiver};
use super::validator::InputValidator;
use super::worker::{spawn_workers, WorkerStats};
use crate::config::AppConfig;
use crate::risk::{RiskClassifier, RiskSummaryService};

/// Every long-lived component of the analysis pipeline
///
/// Built once at startup. The queue producer lives inside the ingestion
/// service; dropping the pipeline and every clone of that service closes
/// the queue so workers drain and stop.
pub struct AnalysisPipeline {
    pub store: Arc<JobStore>,
    pub classifier: Arc<RiskClassifier>,
    pub summary_service: Arc<RiskSummaryService>,
    pub validator: Arc<InputValidator>,
    pub ingestion: IngestionService,
    pub queue_capacity: usize,
    receiver: WorkReceiver,
    batch_size: usize,
    worker_count: usize,
}

impl AnalysisPipeline {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(JobStore::new());
        let classifier = Arc::new(RiskClassifier::with_default_rules());
        let summary_service = Arc::new(RiskSummaryService::new(Arc::clone(&classifier)));
        let validator = Arc::new(InputValidator::new(&config.validation.allowed_sectors));

        let (queue, receiver) = ChannelWorkQueue::with_capacity(config.queue.capacity);
        let queue_capacity = queue.capacity();
        let ingestion = IngestionService::new(
            Arc::clone(&validator),
            Arc::new(UuidJobIdGenerator),
            Arc::clone(&store),
            Arc::new(queue),
        );

        Self {
            store,
            classifier,
            summary_service,
            validator,
            ingestion,
            queue_capacity,
            receiver,
            batch_size: config.worker.batch_size,
            worker_count: config.worker.worker_count,
        }
    }

    /// Start the configured number of batch workers
    pub fn spawn_workers(&self, cancel: &CancellationToken) -> Vec<JoinHandle<WorkerStats>> {
        info!(
            workers = self.worker_count,
            batch_size = self.batch_size,
            capacity = self.queue_capacity,
            "Starting batch workers"
        );
        spawn_workers(
            self.worker_count,
            self.batch_size,
            &self.receiver,
            &self.store,
            &self.classifier,
            cancel,
        )
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}
