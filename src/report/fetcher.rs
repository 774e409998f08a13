//! Single-profile credential report fetch.
//!
//! Generation is triggered exactly once; only retrieval is retried. IAM builds
//! the report asynchronously, so retrieving immediately after triggering
//! usually fails for the first few seconds.

use super::parser::parse_report;
use super::RawReport;
use crate::error::ReportError;
use crate::iam_api::{CredentialReportApi, ReportConnector};
use crate::utils::retry::{retry_fixed, RetryPolicy};
use async_trait::async_trait;
use tracing::{debug, info};

/// Produces one profile's report. The coordinator is generic over this so
/// tests can substitute instrumented fetchers.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch(&self, profile: &str) -> Result<RawReport, ReportError>;
}

/// Fetcher that generates, polls and parses a report through a
/// [`ReportConnector`].
#[derive(Debug, Clone)]
pub struct CredentialReportFetcher<C> {
    connector: C,
    retry: RetryPolicy,
}

impl<C: ReportConnector> CredentialReportFetcher<C> {
    pub fn new(connector: C, retry: RetryPolicy) -> Self {
        Self { connector, retry }
    }
}

#[async_trait]
impl<C: ReportConnector> ReportFetcher for CredentialReportFetcher<C> {
    async fn fetch(&self, profile: &str) -> Result<RawReport, ReportError> {
        let client = self
            .connector
            .connect(profile)
            .await
            .map_err(|source| ReportError::Config {
                profile: profile.to_string(),
                source,
            })?;

        client
            .generate_credential_report()
            .await
            .map_err(|source| ReportError::Generate {
                profile: profile.to_string(),
                source,
            })?;

        let payload = retry_fixed(&self.retry, |attempt| {
            let client = &client;
            async move {
                let result = client.get_credential_report().await;
                if let Err(err) = &result {
                    debug!(profile, attempt, error = %err, "credential report not ready");
                }
                result
            }
        })
        .await
        .map_err(|exhausted| ReportError::RetrievalTimeout {
            profile: profile.to_string(),
            attempts: exhausted.attempts,
            source: exhausted.last_error,
        })?;

        let mut report = parse_report(&payload.content).map_err(|source| ReportError::Parse {
            profile: profile.to_string(),
            source,
        })?;
        report.generated_at = payload.generated_at;

        info!(
            profile,
            rows = report.rows.len(),
            generated_at = ?report.generated_at,
            "fetched credential report"
        );
        Ok(report)
    }
}
