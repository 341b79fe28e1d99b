use serde::{Deserialize, Serialize};

use super::contribution::ActivityBreakdown;

/// Rate metrics for one contribution period, normalised by the days it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMetrics {
    pub label: String,
    pub total: i64,
    pub days: i64,
    pub active_days: i64,
    pub per_week: f64,
    pub per_month: f64,
    pub active_day_rate: f64,
    pub is_partial: bool,
    pub is_reliable: bool,
    pub anomalies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    StrongGrowth,
    Growth,
    Stable,
    Decline,
    StrongDecline,
    InsufficientData,
}

impl std::fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendSignal::StrongGrowth => write!(f, "strong_growth"),
            TrendSignal::Growth => write!(f, "growth"),
            TrendSignal::Stable => write!(f, "stable"),
            TrendSignal::Decline => write!(f, "decline"),
            TrendSignal::StrongDecline => write!(f, "strong_decline"),
            TrendSignal::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakSource {
    /// Computed from daily calendar counts.
    Daily,
    /// Approximated from per-period active-day counts.
    Estimated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub anomalies: Vec<String>,
    pub incomplete_periods: Vec<String>,
    pub unreliable_periods: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.unreliable_periods.is_empty()
    }
}

/// Time-series analytics derived from the contribution periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityOverview {
    pub periods: Vec<PeriodMetrics>,
    pub total_contributions: i64,
    pub weekly_average: f64,
    pub breakdown: ActivityBreakdown,
    pub longest_streak: i64,
    pub current_streak: i64,
    pub streak_source: StreakSource,
    pub moving_average: f64,
    pub momentum_baseline: f64,
    pub momentum_index: f64,
    pub volatility_score: f64,
    pub volatility_samples: usize,
    pub growth_rate: Option<f64>,
    pub trend_signal: TrendSignal,
    pub trend_details: String,
    pub validation: ValidationReport,
}

impl ActivityOverview {
    pub fn is_trending_up(&self) -> bool {
        matches!(
            self.trend_signal,
            TrendSignal::Growth | TrendSignal::StrongGrowth
        )
    }

    pub fn latest(&self) -> Option<&PeriodMetrics> {
        self.periods.last()
    }
}
