use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::score::ComponentKind;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// A century; larger windows cannot be subtracted from every `as_of`.
pub const MAX_FRESHNESS_WINDOW_DAYS: i64 = 36_500;

/// Immutable scoring configuration threaded through every evaluation.
///
/// Defaults reproduce the documented benchmarks. A JSON file may override any
/// subset of fields; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ComponentWeights,
    pub activity: ActivityBenchmarks,
    pub quality: QualityBenchmarks,
    pub professionalism: ProfessionalismBenchmarks,
    pub impact: ImpactBenchmarks,
    pub insights: InsightThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub activity: f64,
    pub documentation: f64,
    pub quality: f64,
    pub professionalism: f64,
    pub impact: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            activity: 25.0,
            documentation: 20.0,
            quality: 25.0,
            professionalism: 15.0,
            impact: 15.0,
        }
    }
}

impl ComponentWeights {
    pub fn get(&self, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::Activity => self.activity,
            ComponentKind::Documentation => self.documentation,
            ComponentKind::Quality => self.quality,
            ComponentKind::Professionalism => self.professionalism,
            ComponentKind::Impact => self.impact,
        }
    }

    pub fn total(&self) -> f64 {
        ComponentKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityBenchmarks {
    // Fallback mode
    pub commits_per_month: f64,
    pub commits_last_year: f64,
    pub longest_streak_days: f64,
    pub account_age_years: f64,

    // Period mode
    pub contributions_per_week: f64,
    pub current_streak_days: f64,
    pub commits: f64,
    pub pull_requests: f64,
    pub reviews: f64,
    pub issues: f64,
    pub trend_points: TrendPoints,

    // Time-series
    pub moving_average_window: usize,
    pub momentum_ceiling: f64,
    pub strong_growth_pct: f64,
    pub growth_pct: f64,
    pub decline_pct: f64,
    pub strong_decline_pct: f64,
    pub partial_period_min_days: u32,
    pub reliability_tolerance: f64,
    pub penalty_per_unreliable_period: f64,
    pub max_validation_penalty: f64,
}

impl Default for ActivityBenchmarks {
    fn default() -> Self {
        Self {
            commits_per_month: 15.0,
            commits_last_year: 100.0,
            longest_streak_days: 30.0,
            account_age_years: 2.0,
            contributions_per_week: 5.0,
            current_streak_days: 7.0,
            commits: 200.0,
            pull_requests: 20.0,
            reviews: 20.0,
            issues: 10.0,
            trend_points: TrendPoints::default(),
            moving_average_window: 3,
            momentum_ceiling: 3.0,
            strong_growth_pct: 25.0,
            growth_pct: 5.0,
            decline_pct: -5.0,
            strong_decline_pct: -25.0,
            partial_period_min_days: 90,
            reliability_tolerance: 0.02,
            penalty_per_unreliable_period: 5.0,
            max_validation_penalty: 15.0,
        }
    }
}

/// Points awarded to each trend classification (the recency sub-score caps them at 8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoints {
    pub strong_growth: f64,
    pub growth: f64,
    pub stable: f64,
    pub insufficient_data: f64,
    pub decline: f64,
    pub strong_decline: f64,
}

impl Default for TrendPoints {
    fn default() -> Self {
        Self {
            strong_growth: 8.0,
            growth: 6.0,
            stable: 5.0,
            insufficient_data: 4.0,
            decline: 2.0,
            strong_decline: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityBenchmarks {
    pub engagement: f64,
    pub languages: f64,
    pub freshness_window_days: i64,
    pub originality_min_size_kb: i64,
}

impl Default for QualityBenchmarks {
    fn default() -> Self {
        Self {
            engagement: 50.0,
            languages: 5.0,
            freshness_window_days: 180,
            originality_min_size_kb: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalismBenchmarks {
    pub meaningful_bio_length: usize,
    pub portfolio_repo_count: i64,
}

impl Default for ProfessionalismBenchmarks {
    fn default() -> Self {
        Self {
            meaningful_bio_length: 20,
            portfolio_repo_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactBenchmarks {
    pub followers: f64,
    pub forks: f64,
    pub open_source_forks: i64,
    pub follower_ratio: f64,
}

impl Default for ImpactBenchmarks {
    fn default() -> Self {
        Self {
            followers: 50.0,
            forks: 20.0,
            open_source_forks: 5,
            follower_ratio: 0.5,
        }
    }
}

/// Thresholds consulted by the insight rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    pub strong_commit_frequency: f64,
    pub dedicated_streak_days: i64,
    pub active_recent_commits: f64,
    pub documentation_culture_ratio: f64,
    pub clear_description_ratio: f64,
    pub validated_stars: i64,
    pub polyglot_languages: usize,
    pub maintained_ratio: f64,
    pub polished_completeness: f64,
    pub recognized_followers: i64,
    pub influence_ratio: f64,
    pub collaborative_forks: i64,

    pub limited_recent_commits: f64,
    pub low_commit_frequency: f64,
    pub poor_readme_ratio: f64,
    pub missing_description_ratio: f64,
    pub low_visibility_stars: i64,
    pub visibility_min_repos: usize,
    pub limited_languages: usize,
    pub stale_ratio: f64,
    pub incomplete_profile: f64,
    pub weak_bio_length: usize,
    pub limited_network_followers: i64,

    pub abandoned_after_days: i64,
    pub superficial_commits: f64,
    pub superficial_repos: usize,
    pub coursework_ratio: f64,
    pub undocumented_ratio: f64,
    pub minimal_public_repos: i64,
    pub new_account_days: i64,
    pub new_account_repos: usize,
    pub inactive_after_days: i64,
    pub unstarred_repos: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            strong_commit_frequency: 15.0,
            dedicated_streak_days: 30,
            active_recent_commits: 50.0,
            documentation_culture_ratio: 0.8,
            clear_description_ratio: 0.7,
            validated_stars: 20,
            polyglot_languages: 5,
            maintained_ratio: 0.5,
            polished_completeness: 0.8,
            recognized_followers: 50,
            influence_ratio: 1.5,
            collaborative_forks: 10,

            limited_recent_commits: 20.0,
            low_commit_frequency: 5.0,
            poor_readme_ratio: 0.5,
            missing_description_ratio: 0.5,
            low_visibility_stars: 5,
            visibility_min_repos: 3,
            limited_languages: 3,
            stale_ratio: 0.3,
            incomplete_profile: 0.6,
            weak_bio_length: 20,
            limited_network_followers: 10,

            abandoned_after_days: 365,
            superficial_commits: 20.0,
            superficial_repos: 5,
            coursework_ratio: 0.7,
            undocumented_ratio: 0.2,
            minimal_public_repos: 3,
            new_account_days: 90,
            new_account_repos: 20,
            inactive_after_days: 90,
            unstarred_repos: 10,
        }
    }
}

impl ScoringConfig {
    /// Loads the optional JSON file named by `SCORING_CONFIG_PATH`, then applies
    /// `WEIGHT_*` overrides, then validates.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("SCORING_CONFIG_PATH") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let overrides = [
            ("WEIGHT_ACTIVITY", &mut config.weights.activity),
            ("WEIGHT_DOCUMENTATION", &mut config.weights.documentation),
            ("WEIGHT_QUALITY", &mut config.weights.quality),
            ("WEIGHT_PROFESSIONALISM", &mut config.weights.professionalism),
            ("WEIGHT_IMPACT", &mut config.weights.impact),
        ];
        for (key, slot) in overrides {
            if let Some(raw) = lookup(key) {
                *slot = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("{} is not a number: {:?}", key, raw))
                })?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        for kind in ComponentKind::ALL {
            let weight = self.weights.get(kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "weight for {} must be a non-negative number, got {}",
                    kind, weight
                )));
            }
        }

        let total = self.weights.total();
        if (total - 100.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::Config(format!(
                "component weights must sum to 100, got {}",
                total
            )));
        }

        for (name, value) in self.benchmarks() {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "benchmark {} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.quality.freshness_window_days > MAX_FRESHNESS_WINDOW_DAYS {
            return Err(Error::Config(format!(
                "quality.freshness_window_days must be at most {}, got {}",
                MAX_FRESHNESS_WINDOW_DAYS, self.quality.freshness_window_days
            )));
        }

        let a = &self.activity;
        if a.moving_average_window == 0 {
            return Err(Error::Config(
                "activity.moving_average_window must be at least 1".to_string(),
            ));
        }
        let ordered = a.strong_growth_pct > a.growth_pct
            && a.growth_pct > a.decline_pct
            && a.decline_pct > a.strong_decline_pct;
        if !ordered {
            return Err(Error::Config(
                "trend thresholds must be strictly decreasing from strong_growth_pct to strong_decline_pct"
                    .to_string(),
            ));
        }
        if a.max_validation_penalty < 0.0 || a.penalty_per_unreliable_period < 0.0 {
            return Err(Error::Config(
                "validation penalties must not be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Every divisor used by a diminishing-returns formula.
    fn benchmarks(&self) -> Vec<(&'static str, f64)> {
        let a = &self.activity;
        vec![
            ("activity.commits_per_month", a.commits_per_month),
            ("activity.commits_last_year", a.commits_last_year),
            ("activity.longest_streak_days", a.longest_streak_days),
            ("activity.account_age_years", a.account_age_years),
            ("activity.contributions_per_week", a.contributions_per_week),
            ("activity.current_streak_days", a.current_streak_days),
            ("activity.commits", a.commits),
            ("activity.pull_requests", a.pull_requests),
            ("activity.reviews", a.reviews),
            ("activity.issues", a.issues),
            ("activity.momentum_ceiling", a.momentum_ceiling),
            ("activity.reliability_tolerance", a.reliability_tolerance),
            ("quality.engagement", self.quality.engagement),
            ("quality.languages", self.quality.languages),
            (
                "quality.freshness_window_days",
                self.quality.freshness_window_days as f64,
            ),
            ("impact.followers", self.impact.followers),
            ("impact.forks", self.impact.forks),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.total(), 100.0);
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        let mut config = ScoringConfig::default();
        config.weights.impact = 10.0;
        let err = config.validate().unwrap_err();
        assert!(err.is_fatal_setup());
        assert!(err.to_string().contains("sum to 100"));
    }

    #[test]
    fn test_non_positive_benchmark_rejected() {
        let mut config = ScoringConfig::default();
        config.impact.followers = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("impact.followers"));

        let mut config = ScoringConfig::default();
        config.activity.commits_per_month = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_freshness_window_is_bounded() {
        let mut config = ScoringConfig::default();
        config.quality.freshness_window_days = MAX_FRESHNESS_WINDOW_DAYS;
        assert!(config.validate().is_ok());

        config.quality.freshness_window_days = 1_000_000_000;
        let err = config.validate().unwrap_err();
        assert!(err.is_fatal_setup());
        assert!(err.to_string().contains("quality.freshness_window_days"));
    }

    #[test]
    fn test_env_weight_overrides() {
        let config = ScoringConfig::from_lookup(lookup_from(&[
            ("WEIGHT_ACTIVITY", "30"),
            ("WEIGHT_IMPACT", "10"),
        ]))
        .unwrap();
        assert_eq!(config.weights.activity, 30.0);
        assert_eq!(config.weights.impact, 10.0);
    }

    #[test]
    fn test_env_override_breaking_sum_is_fatal() {
        let err = ScoringConfig::from_lookup(lookup_from(&[("WEIGHT_ACTIVITY", "40")])).unwrap_err();
        assert!(err.is_fatal_setup());
    }

    #[test]
    fn test_unparseable_weight_is_fatal() {
        let err = ScoringConfig::from_lookup(lookup_from(&[("WEIGHT_QUALITY", "lots")])).unwrap_err();
        assert!(err.to_string().contains("WEIGHT_QUALITY"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScoringConfig::from_json(
            r#"{"quality": {"engagement": 80.0}, "activity": {"commits_per_month": 20.0}}"#,
        )
        .unwrap();
        assert_eq!(config.quality.engagement, 80.0);
        assert_eq!(config.quality.languages, 5.0);
        assert_eq!(config.activity.commits_per_month, 20.0);
        assert_eq!(config.weights, ComponentWeights::default());
    }
}
