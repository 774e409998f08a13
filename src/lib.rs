//! # AWS Credential Report
//!
//! Command-line tool that collects IAM credential reports from several AWS
//! profiles and merges them into one CSV.
//!
//! ## Overview
//!
//! IAM produces credential reports asynchronously: a report is requested with
//! `GenerateCredentialReport` and becomes retrievable through
//! `GetCredentialReport` some seconds later. For every profile this crate
//! triggers generation once, polls for the report with a fixed retry budget,
//! parses the CSV payload, and then merges all accounts into a single table
//! with a leading `profile` column.
//!
//! ## Features
//!
//! - **Bounded concurrency** - at most 4 profiles are fetched at once
//! - **Deterministic output** - rows are grouped by profile in the order given,
//!   regardless of which account answers first
//! - **Schema checking** - every account's report must share the same columns
//! - **Root filtering** - `--exclude-root` drops rows whose ARN ends in `:root`
//! - **Shell completion** for bash, zsh, fish, powershell, and elvish
//!
//! ## Architecture
//!
//! - [`config`] - Immutable run configuration and profile deduplication
//! - [`iam_api`] - IAM client and the traits the pipeline talks through
//! - [`report`] - Fetcher, coordinator, merge engine and CSV sink
//! - [`commands`] - The end-to-end command wiring it all together
//! - [`utils`] - Retry, progress and logging helpers
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```bash
//! aws-credential-report --profile dev --profile prod --exclude-root
//! aws-credential-report -p audit -o /tmp/creds.csv
//! aws-credential-report generate-completion zsh > _aws-credential-report
//! ```
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod iam_api;
pub mod report;
pub mod utils;

pub use error::ReportError;
