//! Run configuration.
//!
//! Built once from command-line flags and passed by reference into the
//! coordinator and merge steps.

use crate::utils::retry::RetryPolicy;
use std::collections::HashSet;
use std::path::PathBuf;

/// Default destination for the merged report.
pub const DEFAULT_OUTPUT: &str = "aws-credentials-report.csv";

/// IAM is a global service; its endpoint lives in us-east-1.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Maximum number of profiles fetched at once.
pub const MAX_IN_FLIGHT: usize = 4;

/// How each profile's report is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    pub max_in_flight: usize,
    pub region: String,
    pub retry: RetryPolicy,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_in_flight: MAX_IN_FLIGHT,
            region: DEFAULT_REGION.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Immutable settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    profiles: Vec<String>,
    pub output: PathBuf,
    pub exclude_root: bool,
    pub fetch: FetchPolicy,
}

impl ReportConfig {
    /// Build a config from raw flag values. Profiles are deduplicated here.
    pub fn new<I, S>(profiles: I, output: impl Into<PathBuf>, exclude_root: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: dedup_profiles(profiles),
            output: output.into(),
            exclude_root,
            fetch: FetchPolicy::default(),
        }
    }

    pub fn with_fetch_policy(mut self, fetch: FetchPolicy) -> Self {
        self.fetch = fetch;
        self
    }

    /// Unique profiles in first-occurrence order.
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }
}

/// Remove duplicate profile names, keeping the first occurrence of each.
///
/// # Examples
///
/// ```
/// use aws_credential_report::config::dedup_profiles;
///
/// let unique = dedup_profiles(["a", "b", "a", "c", "b"]);
/// assert_eq!(unique, vec!["a", "b", "c"]);
/// ```
pub fn dedup_profiles<I, S>(profiles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .map(Into::into)
        .filter(|profile| seen.insert(profile.clone()))
        .collect()
}
