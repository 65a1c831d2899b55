//! Result rollups for campaign statistics.
//!
//! The store groups raw `action_results` rows; the functions here fold those
//! groups into buckets, rates and ranked error summaries. No database access.

use std::ops::AddAssign;

use serde::Serialize;

use crate::result_codes::{RESULT_FAILED, RESULT_REPLIED, RESULT_SKIPPED, RESULT_SUCCESSFUL};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of top errors reported per action when the caller does not say.
pub const DEFAULT_MAX_ERRORS: usize = 5;

// ---------------------------------------------------------------------------
// Result buckets
// ---------------------------------------------------------------------------

/// Result counts split into the four well-known disjoint buckets.
///
/// `total` counts every result, including codes outside the buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultCounts {
    pub successful: i64,
    pub replied: i64,
    pub failed: i64,
    pub skipped: i64,
    pub total: i64,
}

impl ResultCounts {
    /// Fold `(result code, row count)` pairs into buckets.
    pub fn from_code_counts<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i32, i64)>,
    {
        let mut counts = Self::default();
        for (code, count) in rows {
            match code {
                RESULT_SUCCESSFUL => counts.successful += count,
                RESULT_REPLIED => counts.replied += count,
                RESULT_FAILED => counts.failed += count,
                RESULT_SKIPPED => counts.skipped += count,
                _ => {}
            }
            counts.total += count;
        }
        counts
    }

    /// Percentage of successful or replied results, one decimal place.
    pub fn success_rate(&self) -> f64 {
        compute_success_rate(self.successful + self.replied, self.total)
    }
}

impl AddAssign for ResultCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.successful += rhs.successful;
        self.replied += rhs.replied;
        self.failed += rhs.failed;
        self.skipped += rhs.skipped;
        self.total += rhs.total;
    }
}

/// Compute a percentage rounded to one decimal place.
///
/// Returns 0 if `total` is 0.
pub fn compute_success_rate(succeeded: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    ((succeeded as f64 / total as f64) * 1000.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Time window
// ---------------------------------------------------------------------------

/// Earliest and latest result timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultWindow {
    pub first_result_at: Option<Timestamp>,
    pub last_result_at: Option<Timestamp>,
}

impl ResultWindow {
    /// Widen this window to cover `other`.
    pub fn merge(self, other: ResultWindow) -> ResultWindow {
        ResultWindow {
            first_result_at: min_opt(self.first_result_at, other.first_result_at),
            last_result_at: max_opt(self.last_result_at, other.last_result_at),
        }
    }
}

fn min_opt(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn max_opt(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// One group of flagged results sharing code, exception flag and blame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    pub code: i32,
    pub is_exception: bool,
    pub who_to_blame: Option<String>,
    pub count: i64,
}

/// Order error groups by count descending and keep the first `max_errors`.
///
/// Equal counts fall back to code, exception flag, then blame, so the output
/// is stable across runs.
pub fn rank_top_errors(mut errors: Vec<ErrorSummary>, max_errors: usize) -> Vec<ErrorSummary> {
    errors.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.code.cmp(&b.code))
            .then_with(|| a.is_exception.cmp(&b.is_exception))
            .then_with(|| a.who_to_blame.cmp(&b.who_to_blame))
    });
    errors.truncate(max_errors);
    errors
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

/// Statistics for one action of a campaign.
#[derive(Debug, Clone, Serialize)]
pub struct ActionStatistics {
    pub action_id: DbId,
    pub action_name: String,
    pub action_type: String,
    #[serde(flatten)]
    pub counts: ResultCounts,
    pub success_rate: f64,
    #[serde(flatten)]
    pub window: ResultWindow,
    pub top_errors: Vec<ErrorSummary>,
}

impl ActionStatistics {
    pub fn new(
        action_id: DbId,
        action_name: String,
        action_type: String,
        counts: ResultCounts,
        window: ResultWindow,
        top_errors: Vec<ErrorSummary>,
    ) -> Self {
        Self {
            action_id,
            action_name,
            action_type,
            success_rate: counts.success_rate(),
            counts,
            window,
            top_errors,
        }
    }
}

/// Campaign-wide sums across the selected actions.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatisticsTotals {
    #[serde(flatten)]
    pub counts: ResultCounts,
    pub success_rate: f64,
    #[serde(flatten)]
    pub window: ResultWindow,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignStatistics {
    pub campaign_id: DbId,
    pub actions: Vec<ActionStatistics>,
    pub totals: StatisticsTotals,
}

/// Sum per-action statistics into campaign totals.
pub fn summarize_campaign(campaign_id: DbId, actions: Vec<ActionStatistics>) -> CampaignStatistics {
    let mut counts = ResultCounts::default();
    let mut window = ResultWindow::default();
    for action in &actions {
        counts += action.counts;
        window = window.merge(action.window);
    }
    CampaignStatistics {
        campaign_id,
        actions,
        totals: StatisticsTotals {
            success_rate: counts.success_rate(),
            counts,
            window,
        },
    }
}
