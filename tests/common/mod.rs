//! Common test utilities and fixtures

#![allow(dead_code)]

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio::time::sleep;
use trade_risk_analyzer::{AppConfig, JobStatus, JobStore, TradeInput};

/// Polling interval while waiting for a job
pub const POLL_INTERVAL_MS: u64 = 10;
/// Give up waiting for a job after this long
pub const JOB_TIMEOUT: Duration = Duration::from_secs(10);

/// The reference batch: two small public trades and one large private trade
pub fn scenario_inputs() -> Vec<TradeInput> {
    vec![
        TradeInput::new(dec!(500), "Public").with_client("C1"),
        TradeInput::new(dec!(500), "Public").with_client("C1"),
        TradeInput::new(dec!(2000000), "Private").with_client("C2"),
    ]
}

/// Reference batch as a JSON request body
pub static SCENARIO_JSON: Lazy<serde_json::Value> = Lazy::new(|| {
    serde_json::json!([
        {"value": 500, "clientSector": "Public", "clientId": "C1"},
        {"value": 500, "clientSector": "Public", "clientId": "C1"},
        {"value": 2000000, "clientSector": "Private", "clientId": "C2"}
    ])
});

/// Config suitable for tests: small queue, local base url
pub fn test_config(capacity: usize, workers: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.queue.capacity = capacity;
    config.worker.worker_count = workers;
    config
}

/// Poll the store until the job completes
pub async fn wait_for_completion(store: &JobStore, job_id: &str) -> JobStatus {
    let deadline = tokio::time::Instant::now() + JOB_TIMEOUT;
    loop {
        if let Some(status) = store.status(job_id) {
            if status.is_completed() {
                return status;
            }
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "job {} did not complete in time",
            job_id
        );
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
