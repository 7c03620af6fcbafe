//! Background batch worker draining the work queue

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use super::job_store::JobStore;
use super::queue::WorkReceiver;
use crate::common::types::QueueItem;
use crate::risk::RiskClassifier;

/// Default number of items per batch
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// Counters reported by a worker when it stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Batches processed without failure
    pub batches: u64,
    /// Items folded into a known job
    pub registered: u64,
    /// Items whose job id was not in the store
    pub orphaned: u64,
    /// Batches abandoned after a classification failure
    pub failed_batches: u64,
    /// Items lost because their batch was abandoned
    pub dropped: u64,
}

/// Long-running consumer: pulls batches, classifies, registers into the store
pub struct BatchWorker {
    id: usize,
    receiver: WorkReceiver,
    store: Arc<JobStore>,
    classifier: Arc<RiskClassifier>,
    batch_size: usize,
}

impl BatchWorker {
    pub fn new(
        receiver: WorkReceiver,
        store: Arc<JobStore>,
        classifier: Arc<RiskClassifier>,
    ) -> Self {
        Self {
            id: 0,
            receiver,
            store,
            classifier,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the maximum batch size (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    /// Spawn the worker loop onto the runtime
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<WorkerStats> {
        tokio::spawn(self.run(cancel))
    }

    /// Run until cancelled or until the queue is closed and drained
    ///
    /// On cancellation the worker stops waiting for new items, processes
    /// whatever is already buffered, then returns.
    #[instrument(skip(self, cancel), fields(worker = self.id, batch_size = self.batch_size))]
    pub async fn run(self, cancel: CancellationToken) -> WorkerStats {
        info!("Batch worker started");
        let mut stats = WorkerStats::default();
        let mut batch: Vec<QueueItem> = Vec::with_capacity(self.batch_size);

        loop {
            let received = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Cancellation requested, draining buffered items");
                    self.drain_buffered(&mut batch, &mut stats).await;
                    break;
                }
                received = self.receiver.recv_batch(&mut batch, self.batch_size) => received,
            };

            if received == 0 {
                info!("Work queue closed and drained");
                break;
            }

            self.process_batch(&batch, &mut stats);
            batch.clear();
        }

        info!(?stats, "Batch worker stopped");
        stats
    }

    async fn drain_buffered(&self, batch: &mut Vec<QueueItem>, stats: &mut WorkerStats) {
        batch.clear();
        while self.receiver.try_recv_batch(batch, self.batch_size).await > 0 {
            self.process_batch(batch, stats);
            batch.clear();
        }
    }

    /// Classify and register every item of the batch
    ///
    /// A classification failure abandons the rest of the batch: items
    /// before it stay registered, the failing item and everything after it
    /// are lost and their job will not complete.
    fn process_batch(&self, batch: &[QueueItem], stats: &mut WorkerStats) {
        for (position, item) in batch.iter().enumerate() {
            let category = match self.classifier.classify(&item.trade) {
                Ok(category) => category,
                Err(e) => {
                    let dropped = batch.len() - position;
                    error!(
                        job_id = %item.job_id,
                        batch_len = batch.len(),
                        dropped,
                        error = %e,
                        "Failed to process batch, remaining items dropped"
                    );
                    stats.failed_batches += 1;
                    stats.dropped += dropped as u64;
                    return;
                }
            };

            if self.store.register(&item.job_id, category, &item.trade) {
                stats.registered += 1;
            } else {
                stats.orphaned += 1;
            }
        }

        stats.batches += 1;
        debug!(count = batch.len(), "Batch processed");
    }
}

/// Start `worker_count` workers sharing one receiver
pub fn spawn_workers(
    worker_count: usize,
    batch_size: usize,
    receiver: &WorkReceiver,
    store: &Arc<JobStore>,
    classifier: &Arc<RiskClassifier>,
    cancel: &CancellationToken,
) -> Vec<JoinHandle<WorkerStats>> {
    (0..worker_count.max(1))
        .map(|id| {
            BatchWorker::new(receiver.clone(), Arc::clone(store), Arc::clone(classifier))
                .with_batch_size(batch_size)
                .with_id(id)
                .spawn(cancel.clone())
        })
        .collect()
}
