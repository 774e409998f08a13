//! AWS IAM credential report client.
//!
//! The pipeline talks to IAM through two small traits so that the fetch,
//! retry and merge logic can be exercised against in-memory fakes:
//!
//! - [`ReportConnector`] resolves a named profile into a client
//! - [`CredentialReportApi`] triggers generation and retrieves the report
//!
//! [`IamConnector`] is the production implementation backed by `aws-config`
//! and `aws-sdk-iam`.

use crate::error::BoxError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_iam::config::{ProvideCredentials, Region};
use aws_sdk_iam::error::DisplayErrorContext;
use chrono::{DateTime, Utc};

/// Raw credential report as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPayload {
    /// CSV bytes.
    pub content: Vec<u8>,
    /// When IAM generated the report, if it said.
    pub generated_at: Option<DateTime<Utc>>,
}

impl ReportPayload {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            generated_at: None,
        }
    }
}

/// Remote credential report operations for one account.
#[async_trait]
pub trait CredentialReportApi: Send + Sync {
    /// Ask the service to (re)generate the report. Safe to call while a
    /// report is already pending or ready.
    async fn generate_credential_report(&self) -> Result<(), BoxError>;

    /// Fetch the most recently generated report. Fails while generation is
    /// still in progress.
    async fn get_credential_report(&self) -> Result<ReportPayload, BoxError>;
}

/// Resolves a profile name into a ready-to-use API client.
#[async_trait]
pub trait ReportConnector: Send + Sync {
    type Client: CredentialReportApi;

    async fn connect(&self, profile: &str) -> Result<Self::Client, BoxError>;
}

/// Connector for real AWS accounts using the shared config/credentials files.
#[derive(Debug, Clone)]
pub struct IamConnector {
    region: String,
}

impl IamConnector {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

#[async_trait]
impl ReportConnector for IamConnector {
    type Client = IamReportClient;

    async fn connect(&self, profile: &str) -> Result<IamReportClient, BoxError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        // aws-config resolves credentials lazily; resolve them now so a bad
        // profile fails here instead of on the first IAM call.
        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| format!("no credentials provider available for profile '{profile}'"))?;
        provider
            .provide_credentials()
            .await
            .map_err(|err| DisplayErrorContext(err).to_string())?;

        Ok(IamReportClient {
            client: aws_sdk_iam::Client::new(&sdk_config),
        })
    }
}

/// IAM client scoped to a single profile.
#[derive(Debug, Clone)]
pub struct IamReportClient {
    client: aws_sdk_iam::Client,
}

#[async_trait]
impl CredentialReportApi for IamReportClient {
    async fn generate_credential_report(&self) -> Result<(), BoxError> {
        let output = self
            .client
            .generate_credential_report()
            .send()
            .await
            .map_err(|err| DisplayErrorContext(err).to_string())?;

        tracing::debug!(state = ?output.state(), "credential report generation requested");
        Ok(())
    }

    async fn get_credential_report(&self) -> Result<ReportPayload, BoxError> {
        let output = self
            .client
            .get_credential_report()
            .send()
            .await
            .map_err(|err| DisplayErrorContext(err).to_string())?;

        let content = output
            .content()
            .map(|blob| blob.as_ref().to_vec())
            .unwrap_or_default();
        let generated_at = output
            .generated_time()
            .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()));

        Ok(ReportPayload {
            content,
            generated_at,
        })
    }
}
