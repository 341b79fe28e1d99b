use tracing::debug;

use crate::analysis::normalizer::saturating_sum;
use crate::analysis::streak::compute_streaks;
use crate::config::ActivityBenchmarks;
use crate::models::{
    ActivityBreakdown, ActivityOverview, ContributionPeriod, PeriodMetrics, TrendSignal,
    ValidationReport,
};

/// Derives rates, streaks, momentum, volatility and trend from ordered
/// contribution periods.
pub struct ActivityAnalyzer<'a> {
    benchmarks: &'a ActivityBenchmarks,
}

impl<'a> ActivityAnalyzer<'a> {
    pub fn new(benchmarks: &'a ActivityBenchmarks) -> Self {
        Self { benchmarks }
    }

    /// `periods` must already be validated: chronological, positive `days`,
    /// at most one trailing partial period.
    pub fn analyze(&self, periods: &[ContributionPeriod]) -> ActivityOverview {
        let metrics: Vec<PeriodMetrics> = periods.iter().map(|p| self.period_metrics(p)).collect();
        let validation = build_validation(&metrics);

        let total_contributions = saturating_sum(periods.iter().map(|p| p.total));
        let total_days = saturating_sum(periods.iter().map(|p| p.days));
        let weekly_average = rate(total_contributions, total_days, 7.0);

        let mut breakdown = ActivityBreakdown::default();
        for period in periods {
            breakdown.add(&period.breakdown);
        }

        let complete_rates: Vec<f64> = metrics
            .iter()
            .filter(|m| !m.is_partial)
            .map(|m| m.per_week)
            .collect();

        let window = self.benchmarks.moving_average_window;
        let moving_average = mean(tail(&complete_rates, window));
        let (momentum_baseline, momentum_index) = self.momentum(&metrics);
        let volatility_score = volatility(&complete_rates);
        let (trend_signal, growth_rate, trend_details) = self.trend(&metrics);
        let streaks = compute_streaks(periods);

        debug!(
            periods = metrics.len(),
            moving_average,
            momentum_index,
            volatility_score,
            trend = %trend_signal,
            unreliable = validation.unreliable_periods.len(),
            "Analyzed contribution periods"
        );

        ActivityOverview {
            periods: metrics,
            total_contributions,
            weekly_average,
            breakdown,
            longest_streak: streaks.longest,
            current_streak: streaks.current,
            streak_source: streaks.source,
            moving_average,
            momentum_baseline,
            momentum_index,
            volatility_score,
            volatility_samples: complete_rates.len(),
            growth_rate,
            trend_signal,
            trend_details,
            validation,
        }
    }

    fn period_metrics(&self, period: &ContributionPeriod) -> PeriodMetrics {
        let anomalies = self.cross_check(period);
        PeriodMetrics {
            label: period.label.clone(),
            total: period.total,
            days: period.days,
            active_days: period.active_days,
            per_week: rate(period.total, period.days, 7.0),
            per_month: rate(period.total, period.days, 30.0),
            active_day_rate: if period.active_days > 0 {
                period.total as f64 / period.active_days as f64
            } else {
                0.0
            },
            is_partial: period.is_partial,
            is_reliable: anomalies.is_empty(),
            anomalies,
        }
    }

    fn cross_check(&self, period: &ContributionPeriod) -> Vec<String> {
        let mut anomalies = Vec::new();

        if !period.calendar.is_empty() {
            let calendar_sum = saturating_sum(period.calendar.iter().map(|d| d.count));
            let mismatch = if period.total > 0 {
                calendar_sum.abs_diff(period.total) as f64 / period.total as f64
                    > self.benchmarks.reliability_tolerance
            } else {
                calendar_sum > 0
            };
            if mismatch {
                anomalies.push(format!(
                    "{}: calendar sum {} differs from reported total {}",
                    period.label, calendar_sum, period.total
                ));
            }
        }

        let typed = period.breakdown.total();
        if typed > period.total {
            anomalies.push(format!(
                "{}: typed contributions {} exceed reported total {}",
                period.label, typed, period.total
            ));
        }

        if period.total > 0 && period.active_days == 0 {
            anomalies.push(format!(
                "{}: {} contributions but no active days",
                period.label, period.total
            ));
        } else if period.total == 0 && period.active_days > 0 {
            anomalies.push(format!(
                "{}: {} active days but no contributions",
                period.label, period.active_days
            ));
        }

        anomalies
    }

    /// Latest per-week rate against the mean of up to `window` complete
    /// periods that precede it.
    fn momentum(&self, metrics: &[PeriodMetrics]) -> (f64, f64) {
        let Some((latest, prior)) = metrics.split_last() else {
            return (0.0, 1.0);
        };

        let prior_rates: Vec<f64> = prior
            .iter()
            .filter(|m| !m.is_partial)
            .map(|m| m.per_week)
            .collect();
        let baseline = mean(tail(&prior_rates, self.benchmarks.moving_average_window));

        let index = if baseline > 0.0 {
            latest.per_week / baseline
        } else if latest.per_week > 0.0 {
            self.benchmarks.momentum_ceiling
        } else {
            1.0
        };

        (baseline, index)
    }

    fn trend(&self, metrics: &[PeriodMetrics]) -> (TrendSignal, Option<f64>, String) {
        let min_days = i64::from(self.benchmarks.partial_period_min_days);
        let comparable: Vec<&PeriodMetrics> = metrics
            .iter()
            .filter(|m| !m.is_partial || m.days >= min_days)
            .collect();

        let [.., previous, current] = comparable.as_slice() else {
            return (
                TrendSignal::InsufficientData,
                None,
                "fewer than two comparable periods".to_string(),
            );
        };

        if previous.per_week <= 0.0 {
            let signal = if current.per_week > 0.0 {
                TrendSignal::StrongGrowth
            } else {
                TrendSignal::Stable
            };
            let details = format!(
                "{} -> {}: {:.2}/week from no prior activity",
                previous.label, current.label, current.per_week
            );
            return (signal, None, details);
        }

        let change = (current.per_week - previous.per_week) / previous.per_week * 100.0;
        let b = self.benchmarks;
        let signal = if change >= b.strong_growth_pct {
            TrendSignal::StrongGrowth
        } else if change >= b.growth_pct {
            TrendSignal::Growth
        } else if change > b.decline_pct {
            TrendSignal::Stable
        } else if change > b.strong_decline_pct {
            TrendSignal::Decline
        } else {
            TrendSignal::StrongDecline
        };

        let details = format!(
            "{} -> {}: {:.2}/week to {:.2}/week ({:+.1}%)",
            previous.label, current.label, previous.per_week, current.per_week, change
        );
        (signal, Some(change), details)
    }
}

fn build_validation(metrics: &[PeriodMetrics]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for m in metrics {
        if m.is_partial {
            report.incomplete_periods.push(m.label.clone());
        }
        if !m.is_reliable {
            report.unreliable_periods.push(m.label.clone());
            report.anomalies.extend(m.anomalies.iter().cloned());
        }
    }
    report
}

/// Contributions per `unit_days`, 0 for an empty span.
fn rate(total: i64, days: i64, unit_days: f64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    total as f64 / (days as f64 / unit_days)
}

fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of variation clipped to [0, 1]; 0 with fewer than two samples.
fn volatility(rates: &[f64]) -> f64 {
    if rates.len() < 2 {
        return 0.0;
    }
    let avg = mean(rates);
    if avg <= 0.0 {
        return 0.0;
    }
    let variance = rates.iter().map(|r| (r - avg).powi(2)).sum::<f64>() / rates.len() as f64;
    (variance.sqrt() / avg).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalendarDay;
    use chrono::NaiveDate;

    fn period(year: i32, days: i64, total: i64, active_days: i64) -> ContributionPeriod {
        ContributionPeriod {
            label: year.to_string(),
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
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

    fn analyze(periods: &[ContributionPeriod]) -> ActivityOverview {
        let benchmarks = ActivityBenchmarks::default();
        ActivityAnalyzer::new(&benchmarks).analyze(periods)
    }

    #[test]
    fn test_rates_use_elapsed_days() {
        let mut partial = period(2025, 70, 100, 40);
        partial.is_partial = true;
        let overview = analyze(&[partial]);
        let m = &overview.periods[0];
        assert!((m.per_week - 10.0).abs() < 1e-9);
        assert!((m.per_month - 100.0 / (70.0 / 30.0)).abs() < 1e-9);
        assert!((m.active_day_rate - 2.5).abs() < 1e-9);
        assert_eq!(overview.validation.incomplete_periods, vec!["2025"]);
    }

    #[test]
    fn test_strong_growth_on_forty_percent() {
        let overview = analyze(&[period(2023, 364, 520, 200), period(2024, 364, 728, 220)]);
        assert_eq!(overview.trend_signal, TrendSignal::StrongGrowth);
        let growth = overview.growth_rate.unwrap();
        assert!((growth - 40.0).abs() < 1e-9);
        assert!(overview.is_trending_up());
    }

    #[test]
    fn test_single_period_has_insufficient_data() {
        let overview = analyze(&[period(2024, 366, 300, 100)]);
        assert_eq!(overview.trend_signal, TrendSignal::InsufficientData);
        assert_eq!(overview.growth_rate, None);
    }

    #[test]
    fn test_trend_buckets() {
        let cases = [
            (100, 110, TrendSignal::Growth),
            (100, 102, TrendSignal::Stable),
            (100, 90, TrendSignal::Decline),
            (100, 50, TrendSignal::StrongDecline),
        ];
        for (before, after, expected) in cases {
            let overview = analyze(&[period(2023, 364, before, 50), period(2024, 364, after, 50)]);
            assert_eq!(overview.trend_signal, expected, "{} -> {}", before, after);
        }
    }

    #[test]
    fn test_short_partial_period_not_comparable() {
        let mut partial = period(2025, 30, 5, 3);
        partial.is_partial = true;
        let overview = analyze(&[period(2023, 365, 100, 50), period(2024, 366, 200, 80), partial]);
        // 2023 -> 2024 is compared; the 30-day stub is skipped
        assert!(overview.trend_details.starts_with("2023 -> 2024"));

        let mut long_partial = period(2025, 120, 200, 60);
        long_partial.is_partial = true;
        let overview = analyze(&[period(2024, 366, 200, 80), long_partial]);
        assert!(overview.trend_details.starts_with("2024 -> 2025"));
    }

    #[test]
    fn test_momentum_against_prior_average() {
        let overview = analyze(&[
            period(2021, 364, 104, 50),
            period(2022, 364, 208, 50),
            period(2023, 364, 312, 50),
            period(2024, 364, 416, 50),
        ]);
        // baseline is mean of 2, 4, 6 per week
        assert!((overview.momentum_baseline - 4.0).abs() < 1e-9);
        assert!((overview.momentum_index - 2.0).abs() < 1e-9);
        // moving average covers the three most recent complete periods
        assert!((overview.moving_average - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_momentum_division_guards() {
        let idle = analyze(&[period(2023, 364, 0, 0), period(2024, 364, 0, 0)]);
        assert_eq!(idle.momentum_index, 1.0);

        let revived = analyze(&[period(2023, 364, 0, 0), period(2024, 364, 52, 20)]);
        assert_eq!(revived.momentum_index, ActivityBenchmarks::default().momentum_ceiling);
        assert_eq!(revived.trend_signal, TrendSignal::StrongGrowth);

        let empty = analyze(&[]);
        assert_eq!(empty.momentum_index, 1.0);
        assert_eq!(empty.trend_signal, TrendSignal::InsufficientData);
    }

    #[test]
    fn test_volatility_is_bounded() {
        let steady = analyze(&[period(2023, 364, 260, 100), period(2024, 364, 260, 100)]);
        assert_eq!(steady.volatility_score, 0.0);

        let erratic = analyze(&[
            period(2021, 364, 0, 0),
            period(2022, 364, 0, 0),
            period(2023, 364, 2000, 300),
        ]);
        assert_eq!(erratic.volatility_score, 1.0);
    }

    #[test]
    fn test_cross_checks_flag_unreliable_periods() {
        let mut mismatched = period(2024, 3, 100, 3);
        mismatched.calendar = (0..3)
            .map(|i| CalendarDay {
                date: NaiveDate::from_ymd_opt(2024, 1, 1 + i).unwrap(),
                count: 10,
            })
            .collect();
        let mut over_typed = period(2023, 365, 10, 5);
        over_typed.breakdown.pull_requests = 5;

        let overview = analyze(&[over_typed, mismatched]);
        assert_eq!(overview.validation.unreliable_periods, vec!["2023", "2024"]);
        assert!(!overview.validation.is_valid());
        assert_eq!(overview.validation.anomalies.len(), 2);
    }
}
