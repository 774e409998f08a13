//! Credential report fetch and merge pipeline.
//!
//! ## Key Components
//!
//! - [`parser`] - Decodes a raw CSV payload into header and rows
//! - [`fetcher`] - Generates, polls for and parses one profile's report
//! - [`coordinator`] - Fetches many profiles with bounded concurrency
//! - [`merge`] - Combines per-profile reports into one table
//! - [`sink`] - Writes the merged table as CSV
//!
//! ## Example
//!
//! ```no_run
//! use aws_credential_report::iam_api::IamConnector;
//! use aws_credential_report::report::coordinator::fetch_all;
//! use aws_credential_report::report::fetcher::CredentialReportFetcher;
//! use aws_credential_report::report::merge::merge_reports;
//! use aws_credential_report::utils::progress::ProgressBar;
//! use aws_credential_report::utils::retry::RetryPolicy;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), aws_credential_report::ReportError> {
//! let fetcher = Arc::new(CredentialReportFetcher::new(
//!     IamConnector::new("us-east-1"),
//!     RetryPolicy::default(),
//! ));
//! let profiles = vec!["dev".to_string(), "prod".to_string()];
//! let results = fetch_all(fetcher, &profiles, 4, &ProgressBar::hidden()).await?;
//! let table = merge_reports(&results, true)?;
//! println!("{} rows", table.rows.len());
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod fetcher;
pub mod merge;
pub mod parser;
pub mod sink;

use chrono::{DateTime, Utc};

/// One profile's parsed report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReport {
    /// Column names, in payload order. Empty when the payload was empty.
    pub header: Vec<String>,
    /// Data rows, each as wide as `header`.
    pub rows: Vec<Vec<String>>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl RawReport {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            header,
            rows,
            generated_at: None,
        }
    }

    /// True when the payload carried no header at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// A fetched report tagged with its profile and request position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResult {
    pub index: usize,
    pub profile: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ProfileResult {
    pub fn new(index: usize, profile: impl Into<String>, report: RawReport) -> Self {
        Self {
            index,
            profile: profile.into(),
            header: report.header,
            rows: report.rows,
        }
    }
}

/// Final output: synthetic header followed by every kept row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    /// `profile` followed by the common report columns. Empty for an empty table.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MergedTable {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Header first, then data rows; the order they are written in.
    pub fn records(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header)
            .filter(|header| !header.is_empty())
            .chain(self.rows.iter())
    }
}
