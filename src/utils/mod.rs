//! Utility functions and helpers.
//!
//! - [`logging`] - `tracing` subscriber setup
//! - [`progress`] - Progress tracking and display utilities
//! - [`retry`] - Fixed-delay bounded retry for async operations
//!
//! # Examples
//!
//! ```no_run
//! use aws_credential_report::utils::retry::{retry_fixed, RetryPolicy};
//!
//! # async fn poll() -> Result<(), &'static str> { Ok(()) }
//! # async fn demo() {
//! let outcome = retry_fixed(&RetryPolicy::default(), |_attempt| poll()).await;
//! # }
//! ```

pub mod logging;
pub mod progress;
pub mod retry;
