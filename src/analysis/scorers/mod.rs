//! Component scorers. Each maps normalized facts to a bounded [`ComponentScore`]
//! whose sub-metric maxima sum to 100 before weighting.
//!
//! [`ComponentScore`]: crate::models::ComponentScore

pub mod activity;
pub mod documentation;
pub mod quality;
pub mod professionalism;
pub mod impact;

use crate::models::score::round1;
use crate::models::Details;

/// Diminishing-returns cap: `min(actual / benchmark * max_points, max_points)`.
pub(crate) fn capped(actual: f64, benchmark: f64, max_points: f64) -> f64 {
    if benchmark <= 0.0 || !actual.is_finite() {
        return 0.0;
    }
    (actual / benchmark * max_points).clamp(0.0, max_points)
}

/// Direct ratio scaled to `max_points`.
pub(crate) fn proportional(ratio: f64, max_points: f64) -> f64 {
    (ratio * max_points).clamp(0.0, max_points)
}

pub(crate) fn points_if(condition: bool, points: f64) -> f64 {
    if condition {
        points
    } else {
        0.0
    }
}

pub(crate) fn percentage(ratio: f64) -> f64 {
    round1(ratio * 100.0)
}

/// Appends the rounded `score` entry every sub-metric breakdown ends with.
pub(crate) fn scored(details: Details, score: f64) -> Details {
    details.with_scalar("score", round1(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_saturates() {
        assert_eq!(capped(7.5, 15.0, 40.0), 20.0);
        assert_eq!(capped(30.0, 15.0, 40.0), 40.0);
        assert_eq!(capped(-3.0, 15.0, 40.0), 0.0);
        assert_eq!(capped(3.0, 0.0, 40.0), 0.0);
    }

    #[test]
    fn test_proportional() {
        assert_eq!(proportional(0.5, 50.0), 25.0);
        assert_eq!(proportional(1.2, 50.0), 50.0);
    }
}
