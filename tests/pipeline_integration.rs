//! End-to-end tests for the asynchronous analysis pipeline
//!
//! Admission, the bounded queue, batch workers and the job store run
//! together in-process; no network involved.

mod common;

use common::{scenario_inputs, test_config, wait_for_completion};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;
use trade_risk_analyzer::{
    AnalysisError, AnalysisPipeline, AnalysisReport, JobStatus, RiskCategory, TradeInput,
};

fn completed_report(status: JobStatus) -> AnalysisReport {
    match status {
        JobStatus::Completed(report) => report,
        other => panic!("Expected completed job, got {:?}", other),
    }
}

// ============================================================================
// Single job
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_scenario_job_completes_with_summary() {
    let pipeline = AnalysisPipeline::new(&test_config(64, 1));
    let cancel = CancellationToken::new();
    let workers = pipeline.spawn_workers(&cancel);

    let accepted = pipeline
        .ingestion
        .ingest(&scenario_inputs(), &cancel)
        .await
        .unwrap();
    assert_eq!(accepted.enqueued_count, 3);

    let report = completed_report(wait_for_completion(&pipeline.store, &accepted.job_id).await);

    // one worker preserves queue order
    assert_eq!(
        report.categories,
        vec![RiskCategory::Low, RiskCategory::Low, RiskCategory::High]
    );

    let low = &report.summary[&RiskCategory::Low];
    assert_eq!(low.count, 2);
    assert_eq!(low.total_value, dec!(1000));
    assert_eq!(low.top_client.as_deref(), Some("C1"));

    let high = &report.summary[&RiskCategory::High];
    assert_eq!(high.count, 1);
    assert_eq!(high.total_value, dec!(2000000));
    assert_eq!(high.top_client.as_deref(), Some("C2"));

    assert!(!report.summary.contains_key(&RiskCategory::Medium));

    cancel.cancel();
    for worker in workers {
        worker.await.unwrap();
    }
}

#[tokio::test]
async fn test_async_and_sync_paths_agree() {
    let pipeline = AnalysisPipeline::new(&test_config(64, 1));
    let cancel = CancellationToken::new();
    let workers = pipeline.spawn_workers(&cancel);

    let inputs = vec![
        TradeInput::new(dec!(999999.99), "Public").with_client("A"),
        TradeInput::new(dec!(1000000), "public").with_client("B"),
        TradeInput::new(dec!(3000000), "Private").with_client("C"),
        TradeInput::new(dec!(3000000), "Private").with_client("D"),
        TradeInput::new(dec!(10), "Private"),
    ];

    let trades = pipeline.validator.validate_trades(&inputs).unwrap();
    let (sync_categories, sync_summary) = pipeline.summary_service.analyze(&trades).unwrap();

    let accepted = pipeline.ingestion.ingest(&inputs, &cancel).await.unwrap();
    let report = completed_report(wait_for_completion(&pipeline.store, &accepted.job_id).await);

    let sync_report = AnalysisReport::new(sync_categories, &sync_summary);
    assert_eq!(report.categories, sync_report.categories);
    assert_eq!(report.summary, sync_report.summary);

    // equal values keep the first top client
    assert_eq!(
        report.summary[&RiskCategory::High].top_client.as_deref(),
        Some("C")
    );

    cancel.cancel();
    for worker in workers {
        worker.await.unwrap();
    }
}

// ============================================================================
// Admission failures
// ============================================================================

#[tokio::test]
async fn test_rejected_batches_create_no_job() {
    let pipeline = AnalysisPipeline::new(&test_config(8, 1));
    let cancel = CancellationToken::new();

    let err = pipeline.ingestion.ingest(&[], &cancel).await.unwrap_err();
    assert!(matches!(err, AnalysisError::PayloadEmpty));

    let mut inputs = scenario_inputs();
    inputs[1].client_sector = "Unknown".to_string();
    let err = pipeline.ingestion.ingest(&inputs, &cancel).await.unwrap_err();
    match err {
        AnalysisError::ValidationFailed(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].index, 1);
            assert_eq!(errors[0].field, "clientSector");
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }

    assert!(pipeline.store.is_empty());
}

#[tokio::test]
async fn test_unknown_job_lookup() {
    let pipeline = AnalysisPipeline::new(&test_config(8, 1));
    assert!(pipeline.store.status("nope").is_none());
    assert_eq!(pipeline.store.get_status_payload("nope").status_code, 404);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_jobs_with_worker_pool() {
    // queue smaller than a single job forces producers to wait for workers
    let pipeline = AnalysisPipeline::new(&test_config(16, 3));
    let cancel = CancellationToken::new();
    let workers = pipeline.spawn_workers(&cancel);

    let jobs = 6usize;
    let per_job = 50u64;

    let mut admissions = Vec::new();
    for j in 0..jobs {
        let ingestion = pipeline.ingestion.clone();
        let cancel = cancel.clone();
        admissions.push(tokio::spawn(async move {
            let inputs: Vec<_> = (1..=per_job)
                .map(|i| {
                    let sector = if i % 2 == 0 { "Public" } else { "Private" };
                    TradeInput::new(Decimal::from(i * 100000), sector)
                        .with_client(format!("J{}-{}", j, i))
                })
                .collect();
            ingestion.ingest(&inputs, &cancel).await
        }));
    }

    let mut job_ids = Vec::new();
    for admission in admissions {
        let accepted = admission.await.unwrap().unwrap();
        assert_eq!(accepted.enqueued_count, per_job as usize);
        job_ids.push(accepted.job_id);
    }

    for job_id in &job_ids {
        let report = completed_report(wait_for_completion(&pipeline.store, job_id).await);
        assert_eq!(report.categories.len(), per_job as usize);

        let total: u64 = report.summary.values().map(|s| s.count).sum();
        assert_eq!(total, per_job);

        // values 100k..900k are LOW, 1M and above split by sector
        assert_eq!(report.summary[&RiskCategory::Low].count, 9);
        assert_eq!(report.summary[&RiskCategory::Medium].count, 21);
        assert_eq!(report.summary[&RiskCategory::High].count, 20);
        assert_eq!(
            report.summary[&RiskCategory::Medium].total_value,
            Decimal::from(100000u64 * (10..=50).filter(|i| i % 2 == 0).sum::<u64>())
        );

        let state = pipeline.store.try_get(job_id).unwrap();
        let state = state.lock();
        assert_eq!(state.processed(), state.total());
        assert_eq!(state.processed(), state.summary().total_count());
    }

    cancel.cancel();
    let mut registered = 0;
    for worker in workers {
        registered += worker.await.unwrap().registered;
    }
    assert_eq!(registered, jobs as u64 * per_job);
}

#[tokio::test]
async fn test_cancelled_admission_leaves_job_incomplete() {
    // no workers: the queue fills and the producer blocks
    let pipeline = AnalysisPipeline::new(&test_config(2, 1));
    let cancel = CancellationToken::new();

    let ingestion = pipeline.ingestion.clone();
    let admission_cancel = cancel.clone();
    let inputs: Vec<_> = (1..=5u64)
        .map(|i| TradeInput::new(Decimal::from(i), "Public"))
        .collect();
    let handle = tokio::spawn(async move { ingestion.ingest(&inputs, &admission_cancel).await });

    while pipeline.store.is_empty() {
        tokio::task::yield_now().await;
    }
    cancel.cancel();

    let err = handle.await.unwrap().unwrap_err();
    assert!(matches!(err, AnalysisError::Cancelled(_)));

    assert_eq!(pipeline.store.len(), 1);
}
