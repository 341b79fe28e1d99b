use serde::Serialize;

use crate::analysis::activity::ActivityAnalyzer;
use crate::analysis::aggregator::aggregate;
use crate::analysis::insights::InsightDetector;
use crate::analysis::normalizer::{self, NormalizedFacts, Normalizer};
use crate::analysis::scorers;
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::models::{ActivityOverview, ActivityRecord, Insights, ProfileRecords, ScoreBreakdown};

/// Full result of scoring one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub breakdown: ScoreBreakdown,
    pub insights: Insights,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityOverview>,
    pub facts: NormalizedFacts,
}

impl Evaluation {
    pub fn into_parts(self) -> (ScoreBreakdown, Insights) {
        (self.breakdown, self.insights)
    }
}

/// Stateless scorer: the same records and configuration always produce the
/// same evaluation.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, records: &ProfileRecords) -> Result<Evaluation> {
        // Reject malformed records before any derived value is computed
        normalizer::validate(records)?;

        // Step 1: Time-series analysis when per-period history is available
        let activity = match &records.activity {
            ActivityRecord::Periods { periods } => {
                tracing::debug!("Analyzing {} contribution periods", periods.len());
                Some(ActivityAnalyzer::new(&self.config.activity).analyze(periods))
            }
            ActivityRecord::Summary(_) => None,
        };

        // Step 2: Normalize raw records into ratios and counts
        let facts = Normalizer::new(&self.config).normalize(records, activity.as_ref())?;

        // Step 3: Component scores
        let components = vec![
            scorers::activity::score(&facts, activity.as_ref(), &self.config),
            scorers::documentation::score(&facts, &self.config),
            scorers::quality::score(&facts, &self.config),
            scorers::professionalism::score(&facts, &self.config),
            scorers::impact::score(&facts, &self.config),
        ];

        // Step 4: Weighted aggregation
        let breakdown = aggregate(components, &self.config.weights)?;

        // Step 5: Insight rules
        let insights = InsightDetector::new(&self.config.insights).detect(&facts, &breakdown);

        tracing::info!(
            "Final score {:.2} ({}), {} insights",
            breakdown.final_score,
            breakdown.percentile_rank,
            insights.len()
        );

        Ok(Evaluation {
            breakdown,
            insights,
            activity,
            facts,
        })
    }
}

/// One-shot evaluation with an explicit configuration.
pub fn evaluate(
    records: &ProfileRecords,
    config: &ScoringConfig,
) -> Result<(ScoreBreakdown, Insights)> {
    let engine = ScoringEngine::new(config.clone())?;
    Ok(engine.evaluate(records)?.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{records, repo, year};
    use crate::error::Error;
    use crate::models::{
        CommitSummary, ComponentKind, InsightKind, PercentileRank, ProfileFacts, TrendSignal,
    };
    use pretty_assertions::assert_eq;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default()).unwrap()
    }

    fn seasoned_profile() -> ProfileRecords {
        let profile = ProfileFacts {
            has_name: true,
            bio: Some("Backend engineer building distributed data tooling".to_string()),
            has_location: true,
            has_email: true,
            has_company: true,
            website: Some("https://example.dev".to_string()),
            social_handle: Some("dev".to_string()),
            hireable: true,
            account_age_days: 2000,
            followers: 80,
            following: 20,
            public_repos: 6,
        };
        let repos = ["ingest", "scheduler", "cli", "docs-site", "parser", "bench"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut r = repo(name);
                r.description = Some(format!("{} component", name));
                r.has_readme = true;
                r.stars = 10 * (i as i64 + 1);
                r.forks = i as i64;
                r.language = Some(["Rust", "Go", "Python", "TypeScript", "C", "Rust"][i].to_string());
                r.has_issues = true;
                r
            })
            .collect();
        records(
            profile,
            repos,
            ActivityRecord::Periods {
                periods: vec![
                    year(2022, 365, 300, 150),
                    year(2023, 365, 360, 170),
                    year(2024, 366, 504, 200),
                ],
            },
        )
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let records = seasoned_profile();
        let first = engine().evaluate(&records).unwrap();
        let second = engine().evaluate(&records).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.breakdown.final_score.to_bits(),
            second.breakdown.final_score.to_bits()
        );
    }

    #[test]
    fn test_end_to_end_strong_profile() {
        let evaluation = engine().evaluate(&seasoned_profile()).unwrap();
        let breakdown = &evaluation.breakdown;

        for component in breakdown.components() {
            assert!((0.0..=100.0).contains(&component.score), "{}", component.name);
        }
        let expected: f64 = breakdown
            .components()
            .iter()
            .map(|c| c.score * c.weight / 100.0)
            .sum();
        assert!((breakdown.final_score - expected.clamp(0.0, 100.0)).abs() < 1e-9);
        assert_eq!(
            breakdown.percentile_rank,
            PercentileRank::from_score(breakdown.final_score)
        );

        let overview = evaluation.activity.as_ref().unwrap();
        assert_eq!(overview.trend_signal, TrendSignal::StrongGrowth);
        assert!(evaluation.insights.find("Polyglot Developer").is_some());
        assert!(evaluation.insights.find("Strong Documentation Culture").is_some());
        assert!(evaluation.insights.red_flags.is_empty());
    }

    #[test]
    fn test_summary_mode_uses_fallback_activity() {
        let records = records(
            ProfileFacts::default(),
            vec![repo("a")],
            ActivityRecord::Summary(CommitSummary {
                total_commits: 200,
                commits_last_year: 100,
                commits_per_month: 15.0,
                longest_streak: 30,
                current_streak: 3,
                active_days: 120,
                account_age_years: 2.0,
            }),
        );
        let evaluation = engine().evaluate(&records).unwrap();
        assert!(evaluation.activity.is_none());
        assert_eq!(
            evaluation.breakdown.component(ComponentKind::Activity).score,
            100.0
        );
    }

    #[test]
    fn test_zero_repositories_still_scores() {
        let records = records(
            ProfileFacts::default(),
            Vec::new(),
            ActivityRecord::Periods { periods: Vec::new() },
        );
        let evaluation = engine().evaluate(&records).unwrap();
        assert_eq!(
            evaluation.breakdown.component(ComponentKind::Documentation).score,
            0.0
        );
        assert!(evaluation.breakdown.final_score >= 0.0);
        assert_eq!(evaluation.breakdown.percentile_rank, PercentileRank::BelowAverage);
        assert!(evaluation
            .insights
            .red_flags
            .iter()
            .all(|i| i.kind == InsightKind::RedFlag));
        assert!(!evaluation.facts.notes.is_empty());
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let mut broken = year(2024, 366, 10, 5);
        broken.active_days = -1;
        let records = records(
            ProfileFacts::default(),
            Vec::new(),
            ActivityRecord::Periods {
                periods: vec![broken],
            },
        );
        let err = engine().evaluate(&records).unwrap_err();
        match err {
            Error::MalformedInput { field, .. } => {
                assert_eq!(field, "activity.periods[0].active_days")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_weights_fail_at_construction() {
        let mut config = ScoringConfig::default();
        config.weights.impact = 30.0;
        let err = ScoringEngine::new(config).err().unwrap();
        assert!(err.is_fatal_setup());
    }

    #[test]
    fn test_oversized_freshness_window_fails_at_construction() {
        let mut config = ScoringConfig::default();
        config.quality.freshness_window_days = 1_000_000_000;
        let err = ScoringEngine::new(config).err().unwrap();
        assert!(err.is_fatal_setup());
    }

    #[test]
    fn test_free_function_matches_engine() {
        let records = seasoned_profile();
        let (breakdown, insights) = evaluate(&records, &ScoringConfig::default()).unwrap();
        let evaluation = engine().evaluate(&records).unwrap();
        assert_eq!(breakdown, evaluation.breakdown);
        assert_eq!(insights, evaluation.insights);
    }
}
