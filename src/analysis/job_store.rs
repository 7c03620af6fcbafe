use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::job_state::{JobState, SharedJobState};
use super::report::{JobStatus, StatusPayload};
use crate::common::types::{RiskCategory, Trade};

/// Process-scoped registry of jobs keyed by job id
///
/// Created once at startup and handed to the ingestion service, the batch
/// workers and the HTTP layer as an `Arc<JobStore>`. Entries are added on
/// admission and never evicted.
///
/// # Locking
///
/// The id → state map is a `DashMap`; each job has its own mutex. Lookups
/// clone the job's `Arc` and release the map shard before the job lock is
/// taken, so work on one job never blocks another.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: DashMap<String, SharedJobState>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new job expecting `total` trades and start its clock
    ///
    /// The job is visible to every reader and worker once this returns.
    pub fn init_job(&self, job_id: &str, total: u64) -> SharedJobState {
        let state = Arc::new(Mutex::new(JobState::start(total)));
        if self
            .jobs
            .insert(job_id.to_string(), Arc::clone(&state))
            .is_some()
        {
            warn!(job_id, "job id reused, previous state replaced");
        }
        debug!(job_id, total, "job initialized");
        state
    }

    pub fn try_get(&self, job_id: &str) -> Option<SharedJobState> {
        self.jobs.get(job_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.jobs.contains_key(job_id)
    }

    /// Fold one classified trade into its job
    ///
    /// Unknown job ids are a logged no-op returning false.
    pub fn register(&self, job_id: &str, category: RiskCategory, trade: &Trade) -> bool {
        let Some(state) = self.try_get(job_id) else {
            warn!(job_id, "dropping result for unknown job");
            return false;
        };

        let mut state = state.lock();
        if state.register(category, trade) {
            info!(
                job_id,
                total = state.total(),
                elapsed_ms = state.elapsed_ms().unwrap_or_default(),
                "job completed"
            );
        }
        true
    }

    /// Snapshot of a job's progress or final report
    pub fn status(&self, job_id: &str) -> Option<JobStatus> {
        let state = self.try_get(job_id)?;
        let status = state.lock().status();
        Some(status)
    }

    /// Status snapshot plus the HTTP status code to answer with
    ///
    /// 404 for unknown jobs, 202 while processing, 200 once completed.
    pub fn get_status_payload(&self, job_id: &str) -> StatusPayload {
        match self.status(job_id) {
            Some(status) => StatusPayload::from_status(status),
            None => StatusPayload::not_found(),
        }
    }

    /// Number of jobs tracked
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::StatusBody;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_payload_workflow() {
        let store = JobStore::new();
        store.init_job("job-x", 2);

        let payload = store.get_status_payload("job-x");
        assert!(payload.found);
        assert_eq!(payload.status_code, 202);

        assert!(store.register(
            "job-x",
            RiskCategory::Low,
            &Trade::new(dec!(100), "Public").with_client("C1")
        ));
        assert_eq!(store.get_status_payload("job-x").status_code, 202);

        store.register(
            "job-x",
            RiskCategory::Medium,
            &Trade::new(dec!(1000000), "Public").with_client("C2"),
        );
        let payload = store.get_status_payload("job-x");
        assert!(payload.found);
        assert_eq!(payload.status_code, 200);

        match payload.body {
            StatusBody::Job(JobStatus::Completed(report)) => {
                assert_eq!(report.categories, vec![RiskCategory::Low, RiskCategory::Medium]);
                assert!(report.summary.contains_key(&RiskCategory::Low));
                assert!(report.summary.contains_key(&RiskCategory::Medium));
            }
            other => panic!("Expected completed report, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_job() {
        let store = JobStore::new();
        let payload = store.get_status_payload("missing");
        assert!(!payload.found);
        assert_eq!(payload.status_code, 404);
        assert!(store.try_get("missing").is_none());
    }

    #[test]
    fn test_register_unknown_job_is_noop() {
        let store = JobStore::new();
        store.init_job("known", 1);

        assert!(!store.register("unknown", RiskCategory::Low, &Trade::new(dec!(1), "Public")));
        assert!(store.try_get("unknown").is_none());
        assert_eq!(store.try_get("known").unwrap().lock().processed(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_init_job_is_visible_immediately() {
        let store = JobStore::new();
        let state = store.init_job("job-1", 3);

        let looked_up = store.try_get("job-1").unwrap();
        assert!(Arc::ptr_eq(&state, &looked_up));
        assert!(store.contains("job-1"));
        assert!(!store.is_empty());
    }

    #[test]
    fn test_concurrent_registers_on_same_job() {
        let store = Arc::new(JobStore::new());
        let threads = 8u64;
        let per_thread = 250u64;
        store.init_job("hot", threads * per_thread);

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..per_thread {
                        let value = Decimal::from(t * per_thread + i + 1);
                        let trade = Trade::new(value, "Public").with_client(format!("T{}", t));
                        store.register("hot", RiskCategory::Low, &trade);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = store.try_get("hot").unwrap();
        let state = state.lock();
        assert!(state.is_completed());
        assert_eq!(state.processed(), threads * per_thread);

        let low = state.summary().get(RiskCategory::Low).unwrap();
        let n = threads * per_thread;
        assert_eq!(low.count, n);
        assert_eq!(low.total_value, Decimal::from(n * (n + 1) / 2));
        assert_eq!(low.top_value, Decimal::from(n));
        assert_eq!(low.top_client.as_deref(), Some("T7"));
    }

    #[test]
    fn test_concurrent_jobs_are_independent() {
        let store = Arc::new(JobStore::new());
        for j in 0..4 {
            store.init_job(&format!("job-{}", j), 100);
        }

        let handles: Vec<_> = (0..4)
            .map(|j| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let job_id = format!("job-{}", j);
                    for _ in 0..100 {
                        let trade = Trade::new(dec!(2000000), "Private");
                        store.register(&job_id, RiskCategory::High, &trade);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for j in 0..4 {
            let status = store.status(&format!("job-{}", j)).unwrap();
            assert!(status.is_completed());
        }
    }

    #[test]
    fn test_register_does_not_wait_on_other_job_lock() {
        let store = Arc::new(JobStore::new());
        store.init_job("a", 1);
        store.init_job("b", 1);

        let state_a = store.try_get("a").unwrap();
        let held = state_a.lock();

        let (tx, rx) = std::sync::mpsc::channel();
        let worker = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let trade = Trade::new(dec!(500), "Public").with_client("C1");
                tx.send(store.register("b", RiskCategory::Low, &trade)).unwrap();
            })
        };

        // job b completes while job a stays locked
        let registered = rx.recv_timeout(std::time::Duration::from_secs(5));
        assert_eq!(registered, Ok(true));
        assert!(store.status("b").unwrap().is_completed());
        assert_eq!(held.processed(), 0);

        drop(held);
        worker.join().unwrap();
    }
}
