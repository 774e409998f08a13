//! In-memory stand-ins for IAM used by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use aws_credential_report::error::BoxError;
use aws_credential_report::iam_api::{CredentialReportApi, ReportConnector, ReportPayload};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const HEADER: &str = "user,arn,user_creation_time,password_enabled,mfa_active";

/// Behaviour of one fake account.
#[derive(Debug, Clone, Default)]
pub struct FakeAccount {
    pub content: String,
    /// Retrievals that fail before the report is ready.
    pub not_ready: u32,
    /// Time each retrieval takes.
    pub latency: Duration,
    pub fail_connect: bool,
    pub fail_generate: bool,
}

impl FakeAccount {
    pub fn with_rows(rows: &[&str]) -> Self {
        let mut content = format!("{HEADER}\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        Self {
            content,
            ..Default::default()
        }
    }

    pub fn raw(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Default::default()
        }
    }

    pub fn not_ready(mut self, attempts: u32) -> Self {
        self.not_ready = attempts;
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[derive(Debug, Default)]
pub struct CallLog {
    pub generate: HashMap<String, u32>,
    pub get: HashMap<String, u32>,
}

/// Connector over a fixed set of fake accounts.
#[derive(Clone, Default)]
pub struct FakeConnector {
    accounts: Arc<HashMap<String, FakeAccount>>,
    calls: Arc<Mutex<CallLog>>,
}

impl FakeConnector {
    pub fn new<'a>(accounts: impl IntoIterator<Item = (&'a str, FakeAccount)>) -> Self {
        Self {
            accounts: Arc::new(
                accounts
                    .into_iter()
                    .map(|(name, account)| (name.to_string(), account))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    pub fn generate_calls(&self, profile: &str) -> u32 {
        let calls = self.calls.lock().unwrap();
        calls.generate.get(profile).copied().unwrap_or(0)
    }

    pub fn get_calls(&self, profile: &str) -> u32 {
        let calls = self.calls.lock().unwrap();
        calls.get.get(profile).copied().unwrap_or(0)
    }
}

pub struct FakeClient {
    profile: String,
    account: FakeAccount,
    attempts: AtomicU32,
    calls: Arc<Mutex<CallLog>>,
}

#[async_trait]
impl ReportConnector for FakeConnector {
    type Client = FakeClient;

    async fn connect(&self, profile: &str) -> Result<FakeClient, BoxError> {
        let account = self
            .accounts
            .get(profile)
            .cloned()
            .ok_or_else(|| format!("The config profile ({profile}) could not be found"))?;
        if account.fail_connect {
            return Err("no credentials in profile".into());
        }
        Ok(FakeClient {
            profile: profile.to_string(),
            account,
            attempts: AtomicU32::new(0),
            calls: Arc::clone(&self.calls),
        })
    }
}

#[async_trait]
impl CredentialReportApi for FakeClient {
    async fn generate_credential_report(&self) -> Result<(), BoxError> {
        *self
            .calls
            .lock()
            .unwrap()
            .generate
            .entry(self.profile.clone())
            .or_default() += 1;
        if self.account.fail_generate {
            return Err("AccessDenied: iam:GenerateCredentialReport".into());
        }
        Ok(())
    }

    async fn get_credential_report(&self) -> Result<ReportPayload, BoxError> {
        *self
            .calls
            .lock()
            .unwrap()
            .get
            .entry(self.profile.clone())
            .or_default() += 1;
        if !self.account.latency.is_zero() {
            tokio::time::sleep(self.account.latency).await;
        }

        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.account.not_ready {
            return Err(format!("ReportInProgress: attempt {attempt}").into());
        }
        Ok(ReportPayload::new(self.account.content.clone()))
    }
}
