use crate::analysis::normalizer::NormalizedFacts;
use crate::analysis::scorers::{capped, scored};
use crate::config::{ActivityBenchmarks, ScoringConfig};
use crate::models::{ActivityOverview, ComponentKind, ComponentScore, Details, TrendSignal};

// Fallback mode
const FREQUENCY_POINTS: f64 = 40.0;
const RECENT_POINTS: f64 = 30.0;
const STREAK_POINTS: f64 = 20.0;
const MATURITY_POINTS: f64 = 10.0;

// Period mode
const EFFORT_POINTS: f64 = 40.0;
const LONGEST_STREAK_POINTS: f64 = 15.0;
const CURRENT_STREAK_POINTS: f64 = 5.0;
const CONSISTENCY_POINTS: f64 = 5.0;
const RECENT_RATE_POINTS: f64 = 12.0;
const TREND_POINTS: f64 = 8.0;
const COMMIT_TYPE_POINTS: f64 = 4.0;
const PR_TYPE_POINTS: f64 = 4.0;
const REVIEW_TYPE_POINTS: f64 = 4.0;
const ISSUE_TYPE_POINTS: f64 = 3.0;

/// Scores from the time-series overview when one exists, otherwise from the
/// fallback commit summary. Both paths yield the same component shape.
pub fn score(
    facts: &NormalizedFacts,
    overview: Option<&ActivityOverview>,
    config: &ScoringConfig,
) -> ComponentScore {
    let (raw, details) = match overview {
        Some(overview) => period_score(overview, &config.activity),
        None => summary_score(facts, &config.activity),
    };
    ComponentScore::new(ComponentKind::Activity, config.weights.activity, raw, details)
}

fn summary_score(facts: &NormalizedFacts, b: &ActivityBenchmarks) -> (f64, Details) {
    let a = &facts.activity;

    let frequency = capped(a.commits_per_month, b.commits_per_month, FREQUENCY_POINTS);
    let recent = capped(a.commits_last_year, b.commits_last_year, RECENT_POINTS);
    let streak = capped(a.longest_streak as f64, b.longest_streak_days, STREAK_POINTS);
    let maturity = capped(a.account_age_years, b.account_age_years, MATURITY_POINTS);

    let details = Details::new()
        .with_note("mode", "summary")
        .with_nested(
            "commit_frequency",
            scored(Details::new().with_scalar("value", a.commits_per_month), frequency),
        )
        .with_nested(
            "recent_activity",
            scored(
                Details::new().with_scalar("commits_last_year", a.commits_last_year),
                recent,
            ),
        )
        .with_nested(
            "consistency",
            scored(
                Details::new()
                    .with_scalar("longest_streak_days", a.longest_streak as f64)
                    .with_scalar("current_streak_days", a.current_streak as f64),
                streak,
            ),
        )
        .with_nested(
            "account_maturity",
            scored(
                Details::new().with_scalar("years", (a.account_age_years * 10.0).round() / 10.0),
                maturity,
            ),
        );

    (frequency + recent + streak + maturity, details)
}

fn period_score(o: &ActivityOverview, b: &ActivityBenchmarks) -> (f64, Details) {
    let mut details = Details::new().with_note("mode", "periods");
    if o.periods.is_empty() {
        details = details.with_note("note", "No contribution history");
    }

    let effort = capped(o.weekly_average, b.contributions_per_week, EFFORT_POINTS);
    details = details.with_nested(
        "sustained_effort",
        scored(
            Details::new()
                .with_scalar("per_week", o.weekly_average)
                .with_scalar("benchmark_per_week", b.contributions_per_week),
            effort,
        ),
    );

    let streak = capped(o.longest_streak as f64, b.longest_streak_days, LONGEST_STREAK_POINTS);
    let current = capped(o.current_streak as f64, b.current_streak_days, CURRENT_STREAK_POINTS);
    let consistency = if o.volatility_samples >= 2 {
        (1.0 - o.volatility_score) * CONSISTENCY_POINTS
    } else {
        0.0
    };
    details = details.with_nested(
        "stability",
        scored(
            Details::new()
                .with_scalar("longest_streak_days", o.longest_streak as f64)
                .with_scalar("current_streak_days", o.current_streak as f64)
                .with_note("streak_source", format!("{:?}", o.streak_source).to_lowercase())
                .with_scalar("volatility_score", o.volatility_score)
                .with_scalar("streak_points", streak)
                .with_scalar("current_streak_bonus", current)
                .with_scalar("consistency_bonus", consistency),
            streak + current + consistency,
        ),
    );

    let latest_rate = o.latest().map(|m| m.per_week).unwrap_or(0.0);
    let recent = capped(latest_rate, b.contributions_per_week, RECENT_RATE_POINTS);
    let trend = trend_points(o.trend_signal, b);
    details = details.with_nested(
        "recency_momentum",
        scored(
            Details::new()
                .with_scalar("latest_per_week", latest_rate)
                .with_scalar("momentum_index", o.momentum_index)
                .with_note("trend_signal", o.trend_signal.to_string())
                .with_scalar("trend_points", trend),
            recent + trend,
        ),
    );

    let types = &o.breakdown;
    let diversity = capped(types.commits as f64, b.commits, COMMIT_TYPE_POINTS)
        + capped(types.pull_requests as f64, b.pull_requests, PR_TYPE_POINTS)
        + capped(types.reviews as f64, b.reviews, REVIEW_TYPE_POINTS)
        + capped(types.issues as f64, b.issues, ISSUE_TYPE_POINTS);
    details = details.with_nested(
        "diversity",
        scored(
            Details::new()
                .with_scalar("commits", types.commits as f64)
                .with_scalar("pull_requests", types.pull_requests as f64)
                .with_scalar("reviews", types.reviews as f64)
                .with_scalar("issues", types.issues as f64),
            diversity,
        ),
    );

    let unreliable = o.validation.unreliable_periods.len();
    let penalty = (unreliable as f64 * b.penalty_per_unreliable_period).min(b.max_validation_penalty);
    details = details.with_nested(
        "validation_penalty",
        Details::new()
            .with_scalar("unreliable_periods", unreliable as f64)
            .with_scalar("penalty", penalty),
    );

    (effort + streak + current + consistency + recent + trend + diversity - penalty, details)
}

fn trend_points(signal: TrendSignal, b: &ActivityBenchmarks) -> f64 {
    let p = &b.trend_points;
    let points = match signal {
        TrendSignal::StrongGrowth => p.strong_growth,
        TrendSignal::Growth => p.growth,
        TrendSignal::Stable => p.stable,
        TrendSignal::InsufficientData => p.insufficient_data,
        TrendSignal::Decline => p.decline,
        TrendSignal::StrongDecline => p.strong_decline,
    };
    points.clamp(0.0, TREND_POINTS)
}
