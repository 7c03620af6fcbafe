use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;

use super::report::{AnalysisReport, JobProgress, JobStatus};
use crate::common::types::{RiskCategory, RiskSummary, Trade};

/// Job state shared between the store, the workers and status readers
pub type SharedJobState = Arc<Mutex<JobState>>;

/// Aggregate state of one admitted job
///
/// Invariants, held after every call to [`register`](Self::register):
/// - `processed == Σ summary[c].count`
/// - `processed <= total`, and `processed` never decreases
/// - `completed` flips to true exactly once, when `processed` reaches `total`
#[derive(Debug)]
pub struct JobState {
    total: u64,
    processed: u64,
    completed: bool,
    categories: Vec<RiskCategory>,
    summary: RiskSummary,
    started_at: Instant,
    elapsed_ms: Option<u64>,
}

impl JobState {
    /// New job expecting `total` trades, with its clock started
    ///
    /// A job with no trades is complete from the start.
    pub fn start(total: u64) -> Self {
        let mut state = Self {
            total,
            processed: 0,
            completed: false,
            categories: Vec::with_capacity(total.min(1024) as usize),
            summary: RiskSummary::new(),
            started_at: Instant::now(),
            elapsed_ms: None,
        };
        if total == 0 {
            state.complete(0);
        }
        state
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Categories in processing order
    pub fn categories(&self) -> &[RiskCategory] {
        &self.categories
    }

    pub fn summary(&self) -> &RiskSummary {
        &self.summary
    }

    /// Elapsed time captured at completion
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed_ms
    }

    /// Fold one classified trade into the job
    ///
    /// Returns true when this call completed the job. Registrations arriving
    /// after completion are ignored so `processed` never exceeds `total`.
    pub fn register(&mut self, category: RiskCategory, trade: &Trade) -> bool {
        if self.completed {
            return false;
        }

        self.categories.push(category);
        self.summary.record(category, trade);
        self.processed += 1;

        if self.processed >= self.total {
            let elapsed = self.started_at.elapsed().as_millis() as u64;
            self.complete(elapsed);
            return true;
        }
        false
    }

    fn complete(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = Some(elapsed_ms);
        self.summary.processing_time_ms = elapsed_ms;
        self.completed = true;
    }

    /// `round(100 * processed / total, 2)`, or 0 for an empty job
    pub fn progress_percent(&self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.processed) * Decimal::ONE_HUNDRED / Decimal::from(self.total))
            .round_dp(2)
    }

    /// Point-in-time snapshot suitable for reporting
    pub fn status(&self) -> JobStatus {
        if self.completed {
            JobStatus::Completed(AnalysisReport::new(self.categories.clone(), &self.summary))
        } else {
            JobStatus::Processing(JobProgress {
                status: JobProgress::STATUS_PROCESSING,
                processed: self.processed,
                total: self.total,
                progress: self.progress_percent(),
            })
        }
    }
}
