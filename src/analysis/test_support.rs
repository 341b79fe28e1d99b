//! Fixtures shared by the analysis unit tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::analysis::activity::ActivityAnalyzer;
use crate::analysis::normalizer::{NormalizedFacts, Normalizer};
use crate::config::ScoringConfig;
use crate::models::{
    ActivityBreakdown, ActivityRecord, CommitSummary, ContributionPeriod, ProfileFacts,
    ProfileRecords, RepositoryFacts,
};

pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
}

/// A fresh, original, undocumented repository.
pub fn repo(name: &str) -> RepositoryFacts {
    RepositoryFacts {
        name: name.to_string(),
        description: None,
        stars: 0,
        forks: 0,
        language: None,
        languages: Vec::new(),
        has_readme: false,
        size_kb: 500,
        updated_at: as_of() - Duration::days(10),
        has_wiki: false,
        has_pages: false,
        has_issues: false,
        is_fork: false,
    }
}

pub fn year(y: i32, days: i64, total: i64, active_days: i64) -> ContributionPeriod {
    ContributionPeriod {
        label: y.to_string(),
        start: NaiveDate::from_ymd_opt(y, 1, 1).unwrap(),
        days,
        total,
        active_days,
        breakdown: ActivityBreakdown {
            commits: total,
            ..Default::default()
        },
        is_partial: false,
        calendar: Vec::new(),
    }
}

pub fn records(
    profile: ProfileFacts,
    repositories: Vec<RepositoryFacts>,
    activity: ActivityRecord,
) -> ProfileRecords {
    ProfileRecords {
        as_of: as_of(),
        profile,
        repositories,
        activity,
    }
}

pub fn normalize(records: &ProfileRecords) -> NormalizedFacts {
    let config = ScoringConfig::default();
    let overview = match &records.activity {
        ActivityRecord::Periods { periods } => {
            Some(ActivityAnalyzer::new(&config.activity).analyze(periods))
        }
        ActivityRecord::Summary(_) => None,
    };
    Normalizer::new(&config)
        .normalize(records, overview.as_ref())
        .unwrap()
}

pub fn facts_with(profile: ProfileFacts, repos: Vec<RepositoryFacts>) -> NormalizedFacts {
    normalize(&records(
        profile,
        repos,
        ActivityRecord::Summary(CommitSummary::default()),
    ))
}

pub fn facts_with_repos(repos: Vec<RepositoryFacts>) -> NormalizedFacts {
    facts_with(ProfileFacts::default(), repos)
}

pub fn facts_with_profile(profile: ProfileFacts) -> NormalizedFacts {
    facts_with(profile, Vec::new())
}

pub fn facts_with_activity(activity: ActivityRecord) -> NormalizedFacts {
    normalize(&records(ProfileFacts::default(), Vec::new(), activity))
}
