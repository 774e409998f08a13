//! Command implementations.
//!
//! - [`credential_report`] - Fetch and merge IAM credential reports across profiles

pub mod credential_report;
