//! Trait definitions for the pipeline's swappable collaborators

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::errors::Result;
use super::types::{QueueItem, Trade};

/// Produces opaque, unique job identifiers
#[cfg_attr(test, mockall::automock)]
pub trait JobIdGenerator: Send + Sync {
    /// Generate a fresh identifier
    fn new_id(&self) -> String;
}

/// Producer side of the work queue
///
/// Implementations apply backpressure: when the queue is full, callers wait
/// for space instead of failing or dropping items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Enqueue a single item, waiting for space or cancellation
    async fn enqueue(&self, item: QueueItem, cancel: &CancellationToken) -> Result<()>;

    /// Enqueue one item per trade, in order, tagged with `job_id`
    ///
    /// Returns the number of items enqueued. On cancellation the job may be
    /// partially enqueued.
    async fn enqueue_many(
        &self,
        job_id: &str,
        trades: Vec<Trade>,
        cancel: &CancellationToken,
    ) -> Result<usize>;
}
