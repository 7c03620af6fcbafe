use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::classifier::RiskClassifier;
use crate::common::errors::Result;
use crate::common::types::{RiskCategory, RiskSummary, Trade};

/// Synchronous classify-and-aggregate service
///
/// Uses the same aggregation as the job pipeline (`RiskSummary::record`), so
/// a batch analysed in-line and the same batch processed as a job produce
/// identical summaries.
#[derive(Debug, Clone)]
pub struct RiskSummaryService {
    classifier: Arc<RiskClassifier>,
}

impl RiskSummaryService {
    pub fn new(classifier: Arc<RiskClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify every trade and aggregate per category
    ///
    /// Fails on the first trade no rule matches.
    pub fn analyze(&self, trades: &[Trade]) -> Result<(Vec<RiskCategory>, RiskSummary)> {
        let started = Instant::now();
        let mut categories = Vec::with_capacity(trades.len());
        let mut summary = RiskSummary::new();

        for trade in trades {
            let category = self.classifier.classify(trade)?;
            categories.push(category);
            summary.record(category, trade);
        }

        summary.processing_time_ms = started.elapsed().as_millis() as u64;
        debug!(
            trades = trades.len(),
            elapsed_ms = summary.processing_time_ms,
            "analyzed batch synchronously"
        );
        Ok((categories, summary))
    }
}
