use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::profile::{ProfileFacts, RepositoryFacts};

/// Contribution counts by activity type for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityBreakdown {
    pub commits: i64,
    pub pull_requests: i64,
    pub reviews: i64,
    pub issues: i64,
    pub repositories: i64,
}

impl ActivityBreakdown {
    pub fn total(&self) -> i64 {
        [self.pull_requests, self.reviews, self.issues, self.repositories]
            .into_iter()
            .fold(self.commits, i64::saturating_add)
    }

    pub fn add(&mut self, other: &ActivityBreakdown) {
        self.commits = self.commits.saturating_add(other.commits);
        self.pull_requests = self.pull_requests.saturating_add(other.pull_requests);
        self.reviews = self.reviews.saturating_add(other.reviews);
        self.issues = self.issues.saturating_add(other.issues);
        self.repositories = self.repositories.saturating_add(other.repositories);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: i64,
}

/// One calendar period (usually a year) of contribution aggregates.
///
/// `days` is the number of days the period covers so far: the full length for
/// a completed period, the elapsed length for the trailing partial one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPeriod {
    pub label: String,
    pub start: NaiveDate,
    pub days: i64,
    pub total: i64,
    pub active_days: i64,
    #[serde(default)]
    pub breakdown: ActivityBreakdown,
    #[serde(default)]
    pub is_partial: bool,
    /// Daily counts, when the provider supplies them.
    #[serde(default)]
    pub calendar: Vec<CalendarDay>,
}

impl ContributionPeriod {
    pub fn is_fully_active(&self) -> bool {
        self.days > 0 && self.active_days == self.days
    }
}

/// Simplified aggregate used when period-level data is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitSummary {
    pub total_commits: i64,
    pub commits_last_year: i64,
    pub commits_per_month: f64,
    pub longest_streak: i64,
    pub current_streak: i64,
    pub active_days: i64,
    pub account_age_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ActivityRecord {
    /// Chronologically ordered periods; at most the last one is partial.
    Periods { periods: Vec<ContributionPeriod> },
    Summary(CommitSummary),
}

/// Everything the engine consumes for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecords {
    /// Reference instant for every age and recency computation.
    pub as_of: DateTime<Utc>,
    pub profile: ProfileFacts,
    #[serde(default)]
    pub repositories: Vec<RepositoryFacts>,
    pub activity: ActivityRecord,
}
