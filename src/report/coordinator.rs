//! Bounded-concurrency fetch across profiles.
//!
//! One task is spawned per profile. A semaphore admits at most
//! `max_in_flight` of them at a time; the rest wait for a permit before their
//! fetch starts. Each result lands in a slot addressed by the profile's
//! request index, so completion order never affects the output order.
//!
//! Every task runs to completion. Once all have settled the first error, in
//! request order, is returned; there is no partial result.

use super::fetcher::ReportFetcher;
use super::ProfileResult;
use crate::error::ReportError;
use crate::utils::progress::ProgressBar;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// Fetch every profile's report, returning results in `profiles` order.
///
/// `profiles` is expected to be deduplicated already.
pub async fn fetch_all<F>(
    fetcher: Arc<F>,
    profiles: &[String],
    max_in_flight: usize,
    progress: &ProgressBar,
) -> Result<Vec<ProfileResult>, ReportError>
where
    F: ReportFetcher + 'static,
{
    let gate = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let mut handles = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let gate = Arc::clone(&gate);
        let fetcher = Arc::clone(&fetcher);
        let progress = progress.clone();
        let profile = profile.clone();

        handles.push(tokio::spawn(async move {
            let outcome = match gate.acquire_owned().await {
                Ok(_permit) => fetcher.fetch(&profile).await,
                Err(err) => Err(ReportError::Task {
                    profile: profile.clone(),
                    reason: err.to_string(),
                }),
            };
            progress.inc(&profile);
            outcome
        }));
    }

    let mut slots: Vec<Option<ProfileResult>> = vec![None; profiles.len()];
    let mut first_error = None;

    // Awaiting in request order only decides when we look at each task; all
    // of them are already running behind the gate.
    for (index, (profile, handle)) in profiles.iter().zip(handles).enumerate() {
        let outcome = handle.await.unwrap_or_else(|join_err| {
            Err(ReportError::Task {
                profile: profile.clone(),
                reason: join_err.to_string(),
            })
        });

        match outcome {
            Ok(report) => slots[index] = Some(ProfileResult::new(index, profile.as_str(), report)),
            Err(err) => {
                warn!(profile = %profile, error = %err, "credential report fetch failed");
                first_error.get_or_insert(err);
            }
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    Ok(slots.into_iter().flatten().collect())
}
