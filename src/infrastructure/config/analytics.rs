//! Analytics thresholds.

use serde::{Deserialize, Serialize};

/// `[analytics]` section of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Minimum graded picks for a pattern across the whole ledger.
    #[serde(default = "default_min_samples_all_time")]
    pub min_samples_all_time: usize,
    /// Minimum graded picks for a pattern within one date.
    #[serde(default = "default_min_samples_daily")]
    pub min_samples_daily: usize,
    /// Number of patterns reported.
    #[serde(default = "default_top_patterns")]
    pub top_patterns: usize,
}

const fn default_min_samples_all_time() -> usize {
    10
}

const fn default_min_samples_daily() -> usize {
    1
}

const fn default_top_patterns() -> usize {
    5
}

impl AnalyticsConfig {
    /// Sample threshold for a report scoped to one date or the whole ledger.
    #[must_use]
    pub const fn min_samples(&self, daily: bool) -> usize {
        if daily {
            self.min_samples_daily
        } else {
            self.min_samples_all_time
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            min_samples_all_time: default_min_samples_all_time(),
            min_samples_daily: default_min_samples_daily(),
            top_patterns: default_top_patterns(),
        }
    }
}
