//! Error types for the credential report pipeline.
//!
//! Every failure is terminal for the run: there is no per-profile
//! skip-and-continue. Variants carry the offending profile (or column) so the
//! operator can tell which account broke the run.

use std::path::PathBuf;

/// Boxed error returned by remote calls.
///
/// Keeps SDK-specific error types out of the public API so fakes and the real
/// IAM client can share the same traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while fetching, merging or writing credential reports.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Profile-scoped credentials or region could not be resolved.
    #[error("Failed to load AWS configuration for profile '{profile}'")]
    Config {
        profile: String,
        #[source]
        source: BoxError,
    },

    /// The one-shot generation request was rejected.
    #[error("Failed to generate credential report for profile '{profile}'")]
    Generate {
        profile: String,
        #[source]
        source: BoxError,
    },

    /// Retrieval polling ran out of attempts.
    #[error("Credential report for profile '{profile}' not available after {attempts} attempts")]
    RetrievalTimeout {
        profile: String,
        attempts: u32,
        #[source]
        source: BoxError,
    },

    /// The retrieved payload is not well-formed CSV.
    #[error("Failed to parse credential report CSV for profile '{profile}'")]
    Parse {
        profile: String,
        #[source]
        source: csv::Error,
    },

    /// A profile's header disagrees with the canonical header.
    #[error(
        "Report header for profile '{profile}' does not match the first report: expected [{}], found [{}]",
        .expected.join(", "),
        .found.join(", ")
    )]
    HeaderMismatch {
        profile: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A column required for filtering is not present in the header.
    #[error("Unable to locate '{column}' column in report header")]
    MissingColumn { column: String },

    /// A fetch task panicked or could not be admitted.
    #[error("Fetch task for profile '{profile}' failed: {reason}")]
    Task { profile: String, reason: String },

    /// The output file could not be created or written.
    #[error("Failed to write credential report to {}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ReportError {
    /// Profile the error is attributed to, if any.
    pub fn profile(&self) -> Option<&str> {
        match self {
            Self::Config { profile, .. }
            | Self::Generate { profile, .. }
            | Self::RetrievalTimeout { profile, .. }
            | Self::Parse { profile, .. }
            | Self::HeaderMismatch { profile, .. }
            | Self::Task { profile, .. } => Some(profile),
            Self::MissingColumn { .. } | Self::Sink { .. } => None,
        }
    }
}
