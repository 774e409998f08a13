/// Tests for the bounded-concurrency fetch coordinator
mod common;

use async_trait::async_trait;
use aws_credential_report::report::coordinator::fetch_all;
use aws_credential_report::report::fetcher::{CredentialReportFetcher, ReportFetcher};
use aws_credential_report::report::RawReport;
use aws_credential_report::utils::progress::ProgressBar;
use aws_credential_report::utils::retry::RetryPolicy;
use aws_credential_report::ReportError;
use common::{FakeAccount, FakeConnector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Fetcher that records how many fetches are running at once.
#[derive(Default)]
struct InstrumentedFetcher {
    delays: HashMap<String, Duration>,
    failing: Vec<String>,
    active: AtomicUsize,
    peak: AtomicUsize,
    finished: AtomicUsize,
}

impl InstrumentedFetcher {
    fn new(delays: impl IntoIterator<Item = (String, Duration)>) -> Self {
        Self {
            delays: delays.into_iter().collect(),
            ..Default::default()
        }
    }

    fn failing(mut self, profile: &str) -> Self {
        self.failing.push(profile.to_string());
        self
    }
}

#[async_trait]
impl ReportFetcher for InstrumentedFetcher {
    async fn fetch(&self, profile: &str) -> Result<RawReport, ReportError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(profile).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        self.finished.fetch_add(1, Ordering::SeqCst);

        if self.failing.iter().any(|p| p == profile) {
            return Err(ReportError::Generate {
                profile: profile.to_string(),
                source: "AccessDenied".into(),
            });
        }

        Ok(RawReport::new(
            vec!["user".to_string(), "arn".to_string()],
            vec![vec![format!("{profile}-user"), format!("arn:aws:iam::{profile}:user/x")]],
        ))
    }
}

fn profiles(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("profile-{i}")).collect()
}

#[tokio::test(start_paused = true)]
async fn test_never_more_than_four_in_flight() {
    let names = profiles(10);
    let fetcher = Arc::new(InstrumentedFetcher::new(
        names.iter().map(|p| (p.clone(), Duration::from_millis(100))),
    ));

    let start = Instant::now();
    let results = fetch_all(Arc::clone(&fetcher), &names, 4, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(results.len(), 10);
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 4);
    // Three waves of 100ms: 4 + 4 + 2.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_fewer_profiles_than_slots() {
    let names = profiles(2);
    let fetcher = Arc::new(InstrumentedFetcher::new(
        names.iter().map(|p| (p.clone(), Duration::from_millis(50))),
    ));

    let results = fetch_all(Arc::clone(&fetcher), &names, 4, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_results_follow_request_order_not_completion_order() {
    let names = profiles(9);
    // Scrambled delays so completion order differs from request order.
    let fetcher = Arc::new(InstrumentedFetcher::new(
        names
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), Duration::from_millis(((i * 7) % 11) as u64 * 10))),
    ));

    let results = fetch_all(fetcher, &names, 4, &ProgressBar::hidden())
        .await
        .unwrap();

    let order: Vec<_> = results.iter().map(|r| r.profile.clone()).collect();
    assert_eq!(order, names);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.index, i);
        assert_eq!(result.rows[0][0], format!("{}-user", names[i]));
    }
}

#[tokio::test(start_paused = true)]
async fn test_one_failure_fails_run_after_all_settle() {
    let names = profiles(6);
    let fetcher = Arc::new(
        InstrumentedFetcher::new(names.iter().enumerate().map(|(i, p)| {
            let delay = if i == 1 { 0 } else { 50 };
            (p.clone(), Duration::from_millis(delay))
        }))
        .failing("profile-1"),
    );

    let err = fetch_all(Arc::clone(&fetcher), &names, 4, &ProgressBar::hidden())
        .await
        .unwrap_err();

    assert_eq!(err.profile(), Some("profile-1"));
    // Siblings are not cancelled.
    assert_eq!(fetcher.finished.load(Ordering::SeqCst), 6);
}

#[tokio::test(start_paused = true)]
async fn test_first_error_in_request_order_wins() {
    let names = profiles(3);
    let fetcher = Arc::new(
        InstrumentedFetcher::new([
            ("profile-0".to_string(), Duration::from_millis(10)),
            ("profile-1".to_string(), Duration::from_millis(500)),
            ("profile-2".to_string(), Duration::from_millis(0)),
        ])
        .failing("profile-1")
        .failing("profile-2"),
    );

    let err = fetch_all(fetcher, &names, 4, &ProgressBar::hidden())
        .await
        .unwrap_err();
    assert_eq!(err.profile(), Some("profile-1"));
}

#[tokio::test(start_paused = true)]
async fn test_progress_counts_every_profile() {
    let names = profiles(5);
    let fetcher = Arc::new(InstrumentedFetcher::default().failing("profile-3"));
    let progress = ProgressBar::hidden();

    let _ = fetch_all(fetcher, &names, 4, &progress).await;
    assert_eq!(progress.position(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_empty_profile_list() {
    let fetcher = Arc::new(InstrumentedFetcher::default());
    let results = fetch_all(fetcher, &[], 4, &ProgressBar::hidden())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_real_fetcher_with_fake_accounts() {
    let connector = FakeConnector::new([
        ("dev", FakeAccount::with_rows(&["alice,arn:aws:iam::1:user/alice,2024-01-01,true,true"]).not_ready(2)),
        ("prod", FakeAccount::with_rows(&[]).latency(Duration::from_millis(200))),
    ]);
    let fetcher = Arc::new(CredentialReportFetcher::new(
        connector.clone(),
        RetryPolicy::default(),
    ));
    let names = vec!["dev".to_string(), "prod".to_string()];

    let results = fetch_all(fetcher, &names, 4, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(results[0].profile, "dev");
    assert_eq!(results[0].rows.len(), 1);
    assert_eq!(results[1].profile, "prod");
    assert!(results[1].rows.is_empty());
    assert_eq!(connector.generate_calls("dev"), 1);
    assert_eq!(connector.get_calls("dev"), 3);
    assert_eq!(connector.get_calls("prod"), 1);
}
