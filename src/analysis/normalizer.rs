use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::config::ScoringConfig;
use crate::error::{Error, Result};
use crate::models::{
    ActivityOverview, ActivityRecord, CommitSummary, ContributionPeriod, ProfileFacts,
    ProfileRecords, RepositoryFacts,
};
use crate::taxonomy::canonical_language;

const TRAILING_YEAR_DAYS: i64 = 365;
const COMPLETENESS_FIELDS: usize = 5;

/// Ratios and counts derived from the raw records; every scorer reads from here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFacts {
    pub as_of: DateTime<Utc>,
    pub profile: ProfileAggregates,
    pub repos: RepositoryAggregates,
    pub activity: ActivityFacts,
    /// Degraded-data conditions, in detection order.
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileAggregates {
    pub facts: ProfileFacts,
    pub filled_fields: usize,
    pub total_fields: usize,
    pub profile_completeness_ratio: f64,
    pub follower_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryAggregates {
    pub total_repos: usize,
    pub repos_with_readme: usize,
    pub repos_with_description: usize,
    pub total_stars: i64,
    pub total_forks: i64,
    pub engagement: i64,
    pub repos_with_forks: usize,
    pub unique_language_count: usize,
    pub primary_language: Option<String>,
    pub recently_updated: usize,
    pub original_projects: usize,
    pub coursework_repos: usize,
    pub wiki_enabled: usize,
    pub pages_enabled: usize,
    pub issues_enabled: usize,
    pub readme_ratio: f64,
    pub description_ratio: f64,
    pub freshness_ratio: f64,
    pub originality_ratio: f64,
    pub coursework_ratio: f64,
    pub wiki_ratio: f64,
    pub pages_ratio: f64,
    pub issues_ratio: f64,
    pub days_since_last_update: Option<i64>,
}

/// Commit-level activity facts, identical in shape for period and summary input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityFacts {
    pub total_commits: i64,
    pub commits_last_year: f64,
    pub commits_per_month: f64,
    pub longest_streak: i64,
    pub current_streak: i64,
    pub active_days: i64,
    pub account_age_years: f64,
}

pub struct Normalizer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// `overview` carries the time-series analysis when the records hold periods.
    pub fn normalize(
        &self,
        records: &ProfileRecords,
        overview: Option<&ActivityOverview>,
    ) -> Result<NormalizedFacts> {
        validate(records)?;

        let mut notes = Vec::new();
        let profile = profile_aggregates(&records.profile);
        if profile.filled_fields == 0 && !records.profile.has_website() && !records.profile.has_social() {
            notes.push("all profile fields are blank".to_string());
        }

        let repos = self.repository_aggregates(&records.repositories, records.as_of);
        if repos.total_repos == 0 {
            notes.push("no repositories: repository ratios default to 0".to_string());
        }

        let account_age_years = records.profile.account_age_days as f64 / 365.0;
        let activity = match (&records.activity, overview) {
            (ActivityRecord::Periods { periods }, Some(overview)) => {
                if periods.is_empty() {
                    notes.push("empty contribution history".to_string());
                }
                period_facts(periods, overview, account_age_years)
            }
            (ActivityRecord::Periods { .. }, None) => {
                return Err(Error::malformed(
                    "activity.periods",
                    "period records require a time-series analysis",
                ));
            }
            (ActivityRecord::Summary(summary), _) => summary_facts(summary, account_age_years),
        };

        for note in &notes {
            warn!(condition = %note, "Degraded input data");
        }

        Ok(NormalizedFacts {
            as_of: records.as_of,
            profile,
            repos,
            activity,
            notes,
        })
    }

    fn repository_aggregates(
        &self,
        repos: &[RepositoryFacts],
        as_of: DateTime<Utc>,
    ) -> RepositoryAggregates {
        let quality = &self.config.quality;
        // Windows past the representable range count every repository as fresh.
        let fresh_since = Duration::try_days(quality.freshness_window_days)
            .and_then(|window| as_of.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut agg = RepositoryAggregates {
            total_repos: repos.len(),
            ..Default::default()
        };

        let mut languages: BTreeMap<String, String> = BTreeMap::new();
        let mut primary_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut latest_update: Option<DateTime<Utc>> = None;

        for repo in repos {
            agg.repos_with_readme += usize::from(repo.has_readme);
            agg.repos_with_description += usize::from(repo.has_description());
            agg.total_stars = agg.total_stars.saturating_add(repo.stars);
            agg.total_forks = agg.total_forks.saturating_add(repo.forks);
            agg.repos_with_forks += usize::from(repo.forks > 0);
            agg.recently_updated += usize::from(repo.updated_at >= fresh_since);
            agg.original_projects += usize::from(
                !repo.is_likely_tutorial() && repo.size_kb > quality.originality_min_size_kb,
            );
            agg.coursework_repos += usize::from(repo.is_likely_coursework());
            agg.wiki_enabled += usize::from(repo.has_wiki);
            agg.pages_enabled += usize::from(repo.has_pages);
            agg.issues_enabled += usize::from(repo.has_issues);

            if let Some(primary) = repo.language.as_deref().and_then(canonical_language) {
                *primary_counts.entry(primary.clone()).or_insert(0) += 1;
                languages.entry(primary.to_lowercase()).or_insert(primary);
            }
            for lang in repo.languages.iter().filter_map(|l| canonical_language(l)) {
                languages.entry(lang.to_lowercase()).or_insert(lang);
            }

            latest_update = latest_update.max(Some(repo.updated_at));
        }

        agg.engagement = agg.total_stars.saturating_add(agg.total_forks.saturating_mul(2));
        agg.unique_language_count = languages.len();
        // BTreeMap iteration is alphabetical, so ties resolve to the first name.
        agg.primary_language = primary_counts
            .iter()
            .fold(None::<(&String, usize)>, |best, (lang, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((lang, *count)),
            })
            .map(|(lang, _)| lang.clone());
        agg.days_since_last_update = latest_update.map(|t| (as_of - t).num_days());

        let total = agg.total_repos;
        agg.readme_ratio = ratio(agg.repos_with_readme, total);
        agg.description_ratio = ratio(agg.repos_with_description, total);
        agg.freshness_ratio = ratio(agg.recently_updated, total);
        agg.originality_ratio = ratio(agg.original_projects, total);
        agg.coursework_ratio = ratio(agg.coursework_repos, total);
        agg.wiki_ratio = ratio(agg.wiki_enabled, total);
        agg.pages_ratio = ratio(agg.pages_enabled, total);
        agg.issues_ratio = ratio(agg.issues_enabled, total);

        agg
    }
}

fn profile_aggregates(profile: &ProfileFacts) -> ProfileAggregates {
    let filled_fields = [
        profile.has_name,
        profile.has_bio(),
        profile.has_location,
        profile.has_email,
        profile.has_company,
    ]
    .iter()
    .filter(|f| **f)
    .count();

    ProfileAggregates {
        facts: profile.clone(),
        filled_fields,
        total_fields: COMPLETENESS_FIELDS,
        profile_completeness_ratio: ratio(filled_fields, COMPLETENESS_FIELDS),
        follower_ratio: profile.followers as f64 / profile.following.max(1) as f64,
    }
}

fn period_facts(
    periods: &[ContributionPeriod],
    overview: &ActivityOverview,
    account_age_years: f64,
) -> ActivityFacts {
    let commits: Vec<i64> = periods.iter().map(period_commits).collect();
    let total_commits = saturating_sum(commits.iter().copied());
    let total_days = saturating_sum(periods.iter().map(|p| p.days));
    let months = (total_days as f64 / 30.0).max(1.0);

    // Walk back from the latest period until a year is covered, prorating the
    // oldest period that straddles the boundary.
    let mut remaining = TRAILING_YEAR_DAYS;
    let mut commits_last_year = 0.0;
    for (period, count) in periods.iter().zip(&commits).rev() {
        if remaining <= 0 {
            break;
        }
        let covered = period.days.min(remaining);
        commits_last_year += *count as f64 * covered as f64 / period.days as f64;
        remaining -= covered;
    }

    ActivityFacts {
        total_commits,
        commits_last_year,
        commits_per_month: total_commits as f64 / months,
        longest_streak: overview.longest_streak,
        current_streak: overview.current_streak,
        active_days: saturating_sum(periods.iter().map(|p| p.active_days)),
        account_age_years,
    }
}

/// Commits for a period; untyped periods count every contribution as a commit.
fn period_commits(period: &ContributionPeriod) -> i64 {
    if period.breakdown.total() == 0 {
        period.total
    } else {
        period.breakdown.commits
    }
}

fn summary_facts(summary: &CommitSummary, profile_age_years: f64) -> ActivityFacts {
    ActivityFacts {
        total_commits: summary.total_commits,
        commits_last_year: summary.commits_last_year as f64,
        commits_per_month: summary.commits_per_month,
        longest_streak: summary.longest_streak,
        current_streak: summary.current_streak,
        active_days: summary.active_days,
        account_age_years: if summary.account_age_years > 0.0 {
            summary.account_age_years
        } else {
            profile_age_years
        },
    }
}

/// Counts are only bounded below, so totals clamp at `i64::MAX` instead of wrapping.
pub(crate) fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

/// Rejects structurally malformed records before any computation.
pub fn validate(records: &ProfileRecords) -> Result<()> {
    let p = &records.profile;
    non_negative("profile.account_age_days", p.account_age_days)?;
    non_negative("profile.followers", p.followers)?;
    non_negative("profile.following", p.following)?;
    non_negative("profile.public_repos", p.public_repos)?;

    for (i, repo) in records.repositories.iter().enumerate() {
        let field = |name: &str| format!("repositories[{}].{}", i, name);
        if repo.name.trim().is_empty() {
            return Err(Error::malformed(field("name"), "must not be empty"));
        }
        non_negative(&field("stars"), repo.stars)?;
        non_negative(&field("forks"), repo.forks)?;
        non_negative(&field("size_kb"), repo.size_kb)?;
    }

    match &records.activity {
        ActivityRecord::Periods { periods } => validate_periods(periods),
        ActivityRecord::Summary(summary) => validate_summary(summary),
    }
}

fn validate_periods(periods: &[ContributionPeriod]) -> Result<()> {
    let last = periods.len().saturating_sub(1);
    for (i, period) in periods.iter().enumerate() {
        let field = |name: &str| format!("activity.periods[{}].{}", i, name);

        if period.days <= 0 {
            return Err(Error::malformed(field("days"), "must be positive"));
        }
        non_negative(&field("total"), period.total)?;
        non_negative(&field("active_days"), period.active_days)?;
        if period.active_days > period.days {
            return Err(Error::malformed(
                field("active_days"),
                format!(
                    "{} active days exceed the {} elapsed days",
                    period.active_days, period.days
                ),
            ));
        }

        let b = &period.breakdown;
        for (name, value) in [
            ("commits", b.commits),
            ("pull_requests", b.pull_requests),
            ("reviews", b.reviews),
            ("issues", b.issues),
            ("repositories", b.repositories),
        ] {
            non_negative(&field(&format!("breakdown.{}", name)), value)?;
        }

        if period.is_partial && i != last {
            return Err(Error::malformed(
                field("is_partial"),
                "only the most recent period may be partial",
            ));
        }
        if i > 0 && period.start <= periods[i - 1].start {
            return Err(Error::malformed(
                field("start"),
                "periods must be in chronological order",
            ));
        }

        for (j, day) in period.calendar.iter().enumerate() {
            non_negative(&field(&format!("calendar[{}].count", j)), day.count)?;
            if j > 0 && day.date <= period.calendar[j - 1].date {
                return Err(Error::malformed(
                    field(&format!("calendar[{}].date", j)),
                    "calendar days must be in chronological order",
                ));
            }
        }
    }
    Ok(())
}

fn validate_summary(summary: &CommitSummary) -> Result<()> {
    non_negative("activity.total_commits", summary.total_commits)?;
    non_negative("activity.commits_last_year", summary.commits_last_year)?;
    non_negative("activity.longest_streak", summary.longest_streak)?;
    non_negative("activity.current_streak", summary.current_streak)?;
    non_negative("activity.active_days", summary.active_days)?;
    for (name, value) in [
        ("activity.commits_per_month", summary.commits_per_month),
        ("activity.account_age_years", summary.account_age_years),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::malformed(name, "must be a non-negative number"));
        }
    }
    Ok(())
}

fn non_negative(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(Error::malformed(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::activity::ActivityAnalyzer;
    use crate::models::ActivityBreakdown;
    use chrono::{NaiveDate, TimeZone};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap()
    }

    fn repo(name: &str, size_kb: i64, days_ago: i64) -> RepositoryFacts {
        RepositoryFacts {
            name: name.to_string(),
            description: None,
            stars: 0,
            forks: 0,
            language: None,
            languages: Vec::new(),
            has_readme: false,
            size_kb,
            updated_at: as_of() - Duration::days(days_ago),
            has_wiki: false,
            has_pages: false,
            has_issues: false,
            is_fork: false,
        }
    }

    fn records(repositories: Vec<RepositoryFacts>, activity: ActivityRecord) -> ProfileRecords {
        ProfileRecords {
            as_of: as_of(),
            profile: ProfileFacts::default(),
            repositories,
            activity,
        }
    }

    fn summary_records(repositories: Vec<RepositoryFacts>) -> ProfileRecords {
        records(repositories, ActivityRecord::Summary(CommitSummary::default()))
    }

    fn normalize(records: &ProfileRecords) -> Result<NormalizedFacts> {
        let config = ScoringConfig::default();
        let overview = match &records.activity {
            ActivityRecord::Periods { periods } => {
                Some(ActivityAnalyzer::new(&config.activity).analyze(periods))
            }
            ActivityRecord::Summary(_) => None,
        };
        Normalizer::new(&config).normalize(records, overview.as_ref())
    }

    #[test]
    fn test_zero_repositories_degrade_to_zero_ratios() {
        let facts = normalize(&summary_records(Vec::new())).unwrap();
        let r = &facts.repos;
        assert_eq!(r.readme_ratio, 0.0);
        assert_eq!(r.description_ratio, 0.0);
        assert_eq!(r.freshness_ratio, 0.0);
        assert_eq!(r.originality_ratio, 0.0);
        assert_eq!(r.days_since_last_update, None);
        assert!(facts.notes.iter().any(|n| n.contains("no repositories")));
        assert!(facts.notes.iter().any(|n| n.contains("profile fields are blank")));
    }

    #[test]
    fn test_repository_ratios() {
        let mut documented = repo("compiler", 900, 10);
        documented.has_readme = true;
        documented.description = Some("A toy compiler".to_string());
        documented.stars = 7;
        documented.forks = 2;
        documented.language = Some("rust".to_string());
        documented.languages = vec!["Shell".to_string()];
        let mut tutorial = repo("rust-tutorial", 500, 400);
        tutorial.language = Some("Rust".to_string());
        let mut small = repo("dotfiles", 20, 30);
        small.language = Some("Shell".to_string());
        let tiny = repo("notes", 5, 700);

        let facts = normalize(&summary_records(vec![documented, tutorial, small, tiny])).unwrap();
        let r = &facts.repos;
        assert_eq!(r.total_repos, 4);
        assert_eq!(r.readme_ratio, 0.25);
        assert_eq!(r.description_ratio, 0.25);
        assert_eq!(r.engagement, 11);
        assert_eq!(r.unique_language_count, 2);
        assert_eq!(r.primary_language.as_deref(), Some("Rust"));
        assert_eq!(r.freshness_ratio, 0.5);
        assert_eq!(r.originality_ratio, 0.25);
        assert_eq!(r.days_since_last_update, Some(10));
    }

    #[test]
    fn test_profile_completeness_and_follower_ratio() {
        let mut recs = summary_records(Vec::new());
        recs.profile = ProfileFacts {
            has_name: true,
            bio: Some("Systems programmer".to_string()),
            has_location: true,
            followers: 30,
            following: 0,
            ..Default::default()
        };
        let facts = normalize(&recs).unwrap();
        assert_eq!(facts.profile.filled_fields, 3);
        assert!((facts.profile.profile_completeness_ratio - 0.6).abs() < 1e-9);
        assert_eq!(facts.profile.follower_ratio, 30.0);
    }

    #[test]
    fn test_period_activity_facts() {
        let periods = vec![
            ContributionPeriod {
                label: "2024".to_string(),
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                days: 366,
                total: 400,
                active_days: 150,
                breakdown: ActivityBreakdown {
                    commits: 366,
                    pull_requests: 20,
                    ..Default::default()
                },
                is_partial: false,
                calendar: Vec::new(),
            },
            ContributionPeriod {
                label: "2025".to_string(),
                start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                days: 180,
                total: 90,
                active_days: 60,
                breakdown: ActivityBreakdown::default(),
                is_partial: true,
                calendar: Vec::new(),
            },
        ];
        let facts = normalize(&records(Vec::new(), ActivityRecord::Periods { periods })).unwrap();
        let a = &facts.activity;
        assert_eq!(a.total_commits, 456);
        assert_eq!(a.active_days, 210);
        // 90 from 2025, then 185 of 366 days of 2024 at 1 commit/day
        assert!((a.commits_last_year - 275.0).abs() < 1e-9);
        assert!((a.commits_per_month - 456.0 / (546.0 / 30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_active_days_rejected() {
        let periods = vec![ContributionPeriod {
            label: "2024".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days: 366,
            total: 10,
            active_days: -1,
            breakdown: ActivityBreakdown::default(),
            is_partial: false,
            calendar: Vec::new(),
        }];
        let err = normalize(&records(Vec::new(), ActivityRecord::Periods { periods })).unwrap_err();
        match err {
            Error::MalformedInput { field, .. } => {
                assert_eq!(field, "activity.periods[0].active_days")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_active_days_cannot_exceed_elapsed_days() {
        let periods = vec![ContributionPeriod {
            label: "2025".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            days: 30,
            total: 100,
            active_days: 31,
            breakdown: ActivityBreakdown::default(),
            is_partial: true,
            calendar: Vec::new(),
        }];
        assert!(validate(&records(Vec::new(), ActivityRecord::Periods { periods })).is_err());
    }

    #[test]
    fn test_only_trailing_period_may_be_partial() {
        let make = |year: i32, partial: bool| ContributionPeriod {
            label: year.to_string(),
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            days: 365,
            total: 10,
            active_days: 5,
            breakdown: ActivityBreakdown::default(),
            is_partial: partial,
            calendar: Vec::new(),
        };
        let bad = records(
            Vec::new(),
            ActivityRecord::Periods {
                periods: vec![make(2023, true), make(2024, false)],
            },
        );
        assert!(validate(&bad).is_err());

        let unordered = records(
            Vec::new(),
            ActivityRecord::Periods {
                periods: vec![make(2024, false), make(2023, false)],
            },
        );
        assert!(validate(&unordered).is_err());
    }

    #[test]
    fn test_negative_repository_counts_rejected() {
        let mut bad = repo("api", 100, 1);
        bad.stars = -3;
        let err = validate(&summary_records(vec![bad])).unwrap_err();
        assert!(err.to_string().contains("repositories[0].stars"));
    }

    #[test]
    fn test_extreme_repository_counts_saturate() {
        let mut famous = repo("famous", 100, 1);
        famous.stars = i64::MAX;
        let mut starred = repo("starred", 100, 1);
        starred.stars = 1;
        let facts = normalize(&summary_records(vec![famous, starred])).unwrap();
        assert_eq!(facts.repos.total_stars, i64::MAX);
        assert_eq!(facts.repos.engagement, i64::MAX);

        let mut forked = repo("forked", 100, 1);
        forked.forks = i64::MAX / 2 + 1;
        let facts = normalize(&summary_records(vec![forked])).unwrap();
        assert_eq!(facts.repos.total_forks, i64::MAX / 2 + 1);
        assert_eq!(facts.repos.engagement, i64::MAX);
    }

    #[test]
    fn test_extreme_period_totals_saturate() {
        let huge = |year: i32| ContributionPeriod {
            label: year.to_string(),
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            days: i64::MAX,
            total: i64::MAX,
            active_days: i64::MAX,
            breakdown: ActivityBreakdown {
                commits: i64::MAX,
                reviews: i64::MAX,
                ..Default::default()
            },
            is_partial: false,
            calendar: Vec::new(),
        };
        let facts = normalize(&records(
            Vec::new(),
            ActivityRecord::Periods {
                periods: vec![huge(2023), huge(2024)],
            },
        ))
        .unwrap();
        assert_eq!(facts.activity.total_commits, i64::MAX);
        assert_eq!(facts.activity.active_days, i64::MAX);
        assert_eq!(facts.activity.longest_streak, i64::MAX);
    }

    #[test]
    fn test_freshness_cutoff_never_overflows() {
        let mut config = ScoringConfig::default();
        config.quality.freshness_window_days = i64::MAX;
        let records = summary_records(vec![repo("old", 100, 3000)]);
        let facts = Normalizer::new(&config).normalize(&records, None).unwrap();
        assert_eq!(facts.repos.recently_updated, 1);
    }
}
