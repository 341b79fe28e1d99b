use chrono::NaiveDate;

use crate::models::{CalendarDay, ContributionPeriod, StreakSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streaks {
    pub longest: i64,
    pub current: i64,
    pub source: StreakSource,
}

/// Streaks from daily calendars when every period carries one, otherwise an
/// estimate from active-day counts.
pub fn compute_streaks(periods: &[ContributionPeriod]) -> Streaks {
    let has_calendars = !periods.is_empty() && periods.iter().all(|p| !p.calendar.is_empty());

    if has_calendars {
        let mut days: Vec<CalendarDay> = periods
            .iter()
            .flat_map(|p| p.calendar.iter().copied())
            .collect();
        days.sort_by_key(|d| d.date);
        days.dedup_by_key(|d| d.date);

        let (longest, current) = daily_streaks(&days);
        Streaks {
            longest,
            current,
            source: StreakSource::Daily,
        }
    } else {
        let (longest, current) = estimated_streaks(periods);
        Streaks {
            longest,
            current,
            source: StreakSource::Estimated,
        }
    }
}

/// `days` must be sorted by date. A missing date breaks the run.
fn daily_streaks(days: &[CalendarDay]) -> (i64, i64) {
    let mut longest = 0;
    let mut run = 0;
    let mut last_active: Option<NaiveDate> = None;

    for day in days {
        if day.count > 0 {
            let continues = last_active
                .and_then(|d| d.succ_opt())
                .map(|next| next == day.date)
                .unwrap_or(false);
            run = if continues { run + 1 } else { 1 };
            last_active = Some(day.date);
            longest = longest.max(run);
        } else {
            run = 0;
            last_active = None;
        }
    }

    // `run` is already 0 when the most recent recorded day was inactive.
    (longest, run)
}

fn estimated_streaks(periods: &[ContributionPeriod]) -> (i64, i64) {
    let mut longest = 0;
    let mut chain: i64 = 0;

    for period in periods {
        if period.is_fully_active() {
            chain = chain.saturating_add(period.days);
            longest = longest.max(chain);
        } else {
            chain = 0;
            longest = longest.max(min_longest_run(period.active_days, period.days));
        }
    }

    let current = match periods.last() {
        Some(last) if last.is_fully_active() => chain,
        Some(last) => min_longest_run(last.active_days, last.days),
        None => 0,
    };

    (longest, current)
}

/// Smallest possible longest run when `active` of `days` are active: the
/// inactive days split the active ones into at most `days - active + 1` runs.
fn min_longest_run(active: i64, days: i64) -> i64 {
    if active <= 0 || days <= 0 {
        return 0;
    }
    let groups = days - active + 1;
    (active - 1) / groups + 1
}
