//! Bounded work queue between admission and the batch workers

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::common::channels::create_work_channel_with_size;
use crate::common::errors::{AnalysisError, Result};
use crate::common::traits::WorkQueue;
use crate::common::types::{QueueItem, Trade};

/// Producer handle over a bounded mpsc channel
///
/// Cloning is cheap; every clone is another producer. The queue closes once
/// all producers are dropped and consumers have drained what is left.
#[derive(Debug, Clone)]
pub struct ChannelWorkQueue {
    sender: mpsc::Sender<QueueItem>,
}

impl ChannelWorkQueue {
    pub fn new(sender: mpsc::Sender<QueueItem>) -> Self {
        Self { sender }
    }

    /// Create a queue of the given capacity together with its consumer side
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> (Self, WorkReceiver) {
        let (sender, receiver) = create_work_channel_with_size(capacity);
        (Self::new(sender), WorkReceiver::new(receiver))
    }

    /// Maximum number of buffered items
    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Free slots right now
    pub fn available(&self) -> usize {
        self.sender.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[async_trait]
impl WorkQueue for ChannelWorkQueue {
    async fn enqueue(&self, item: QueueItem, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AnalysisError::Cancelled("enqueue".to_string())),
            sent = self.sender.send(item) => sent.map_err(|_| AnalysisError::QueueClosed),
        }
    }

    async fn enqueue_many(
        &self,
        job_id: &str,
        trades: Vec<Trade>,
        cancel: &CancellationToken,
    ) -> Result<usize> {
        let total = trades.len();
        let mut enqueued = 0usize;

        for trade in trades {
            if let Err(e) = self.enqueue(QueueItem::new(job_id, trade), cancel).await {
                warn!(
                    job_id,
                    enqueued,
                    total,
                    error = %e,
                    "enqueue interrupted, job is partially enqueued"
                );
                return Err(e);
            }
            enqueued += 1;
        }

        Ok(enqueued)
    }
}

/// Consumer side of the work queue, shareable between workers
///
/// The underlying receiver is held only while a batch is being pulled.
#[derive(Debug, Clone)]
pub struct WorkReceiver {
    inner: Arc<Mutex<mpsc::Receiver<QueueItem>>>,
}

impl WorkReceiver {
    pub fn new(receiver: mpsc::Receiver<QueueItem>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Wait for at least one item, then move up to `limit` ready items into `buffer`
    ///
    /// Returns 0 only once the queue is closed and drained. Cancel safe.
    pub async fn recv_batch(&self, buffer: &mut Vec<QueueItem>, limit: usize) -> usize {
        let mut receiver = self.inner.lock().await;
        receiver.recv_many(buffer, limit).await
    }

    /// Move up to `limit` already-buffered items into `buffer` without waiting
    pub async fn try_recv_batch(&self, buffer: &mut Vec<QueueItem>, limit: usize) -> usize {
        let mut receiver = self.inner.lock().await;
        let mut received = 0;
        while received < limit {
            match receiver.try_recv() {
                Ok(item) => {
                    buffer.push(item);
                    received += 1;
                }
                Err(_) => break,
            }
        }
        received
    }
}
