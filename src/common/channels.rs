//! Channel type definitions for the work queue

use tokio::sync::mpsc;

use super::types::QueueItem;

/// Default work queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 50_000;

/// Create a new work channel with a custom capacity
///
/// # Panics
/// Panics if `size` is zero.
pub fn create_work_channel_with_size(
    size: usize,
) -> (mpsc::Sender<QueueItem>, mpsc::Receiver<QueueItem>) {
    mpsc::channel(size)
}
