//! Progress bar utilities using indicatif
//!
//! Tracks how many profiles have settled while reports are being fetched.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar wrapper counting settled profiles
#[derive(Clone)]
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a new progress bar with known total
    pub fn new(total: usize, label: &str) -> Self {
        let bar = IndicatifBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█░"),
        );
        bar.set_prefix(label.to_string());

        Self { bar }
    }

    /// A bar that never draws; used by tests and library callers
    pub fn hidden() -> Self {
        Self {
            bar: IndicatifBar::hidden(),
        }
    }

    /// Mark one more profile as settled
    pub fn inc(&self, profile: &str) {
        self.bar.set_message(profile.to_string());
        self.bar.inc(1);
    }

    pub fn position(&self) -> usize {
        self.bar.position() as usize
    }

    /// Finish and remove the bar from the terminal
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}
