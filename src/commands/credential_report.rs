//! Multi-profile credential report export.
//!
//! Requests a fresh IAM credential report in every listed profile, waits for
//! each to become available, and merges them into a single CSV with a leading
//! `profile` column.
//!
//! # Usage
//!
//! ```bash
//! # Merge two accounts into the default aws-credentials-report.csv
//! aws-credential-report --profile dev --profile prod
//!
//! # Drop root-user rows and pick the output path
//! aws-credential-report -p dev -p prod --exclude-root -o creds.csv
//! ```
//!
//! # Requirements
//!
//! Each profile must resolve through the standard AWS config/credentials files
//! and allow `iam:GenerateCredentialReport` and `iam:GetCredentialReport`.
//!
//! # Output
//!
//! CSV whose first row is `profile` followed by IAM's credential report
//! columns, then one row per (profile, user) pair, grouped by profile in the
//! order the profiles were given. The file is only created once every profile
//! has been fetched and merged successfully.

use crate::config::ReportConfig;
use crate::iam_api::ReportConnector;
use crate::report::coordinator::fetch_all;
use crate::report::fetcher::CredentialReportFetcher;
use crate::report::merge::merge_reports;
use crate::report::sink::write_csv_file;
use crate::utils::progress::ProgressBar;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub profiles: usize,
    pub rows_written: usize,
    pub root_rows_excluded: usize,
    pub output: PathBuf,
}

pub async fn run<C>(config: &ReportConfig, connector: C) -> Result<ReportSummary>
where
    C: ReportConnector + 'static,
{
    let profiles = config.profiles();
    if profiles.is_empty() {
        bail!("At least one profile is required");
    }

    eprintln!("=== AWS Credential Report ===");
    eprintln!("Profiles: {}", profiles.join(", "));
    if config.exclude_root {
        eprintln!("Excluding root users");
    }
    eprintln!();

    let fetcher = Arc::new(CredentialReportFetcher::new(connector, config.fetch.retry));
    let progress = ProgressBar::new(profiles.len(), "Fetching reports");
    let fetched = fetch_all(fetcher, profiles, config.fetch.max_in_flight, &progress).await;
    progress.finish_and_clear();

    let results = fetched.context("Error fetching credential reports")?;
    let table = merge_reports(&results, config.exclude_root)
        .context("Error merging credential reports")?;
    write_csv_file(&table, &config.output)?;

    let source_rows: usize = results.iter().map(|r| r.rows.len()).sum();
    let summary = ReportSummary {
        profiles: results.len(),
        rows_written: table.rows.len(),
        root_rows_excluded: source_rows - table.rows.len(),
        output: config.output.clone(),
    };

    eprintln!("=== Summary ===");
    eprintln!("Profiles fetched: {}", summary.profiles);
    eprintln!("Rows written: {}", summary.rows_written);
    if config.exclude_root {
        eprintln!("Root rows excluded: {}", summary.root_rows_excluded);
    }
    eprintln!();
    eprintln!("CSV written to: {}", summary.output.display());

    Ok(summary)
}
