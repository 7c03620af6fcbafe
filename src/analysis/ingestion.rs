//! Admission of trade batches into the asynchronous pipeline

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::job_store::JobStore;
use super::validator::{InputValidator, TradeInput};
use crate::common::errors::Result;
use crate::common::traits::{JobIdGenerator, WorkQueue};

/// Receipt for an admitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedJob {
    pub job_id: String,
    pub enqueued_count: usize,
}

/// Validates a batch, registers a job and feeds its trades to the queue
#[derive(Clone)]
pub struct IngestionService {
    validator: Arc<InputValidator>,
    id_gen: Arc<dyn JobIdGenerator>,
    store: Arc<JobStore>,
    queue: Arc<dyn WorkQueue>,
}

impl IngestionService {
    pub fn new(
        validator: Arc<InputValidator>,
        id_gen: Arc<dyn JobIdGenerator>,
        store: Arc<JobStore>,
        queue: Arc<dyn WorkQueue>,
    ) -> Self {
        Self {
            validator,
            id_gen,
            store,
            queue,
        }
    }

    /// Admit a batch
    ///
    /// Validation is all-or-nothing and happens before any job exists. The
    /// job is registered in the store before its first item is enqueued, so
    /// a worker can never see an item for a job it cannot find. Waits for
    /// queue space when the queue is full.
    #[instrument(skip(self, items, cancel), fields(items = items.len()))]
    pub async fn ingest(
        &self,
        items: &[TradeInput],
        cancel: &CancellationToken,
    ) -> Result<AcceptedJob> {
        let trades = self.validator.validate_trades(items)?;

        let job_id = self.id_gen.new_id();
        self.store.init_job(&job_id, trades.len() as u64);

        let enqueued_count = match self.queue.enqueue_many(&job_id, trades, cancel).await {
            Ok(count) => count,
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "job admitted but not fully enqueued");
                return Err(e);
            }
        };

        info!(job_id = %job_id, enqueued_count, "Job admitted");
        Ok(AcceptedJob {
            job_id,
            enqueued_count,
        })
    }
}

impl std::fmt::Debug for IngestionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionService")
            .field("validator", &self.validator)
            .field("jobs", &self.store.len())
            .finish()
    }
}
