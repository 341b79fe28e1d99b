use crate::analysis::normalizer::NormalizedFacts;
use crate::analysis::scorers::{capped, points_if, scored};
use crate::config::ScoringConfig;
use crate::models::{ComponentKind, ComponentScore, Details};

const FOLLOWER_POINTS: f64 = 40.0;
const FORK_POINTS: f64 = 30.0;
const FORKED_REPO_POINTS: f64 = 10.0;
const OPEN_SOURCE_POINTS: f64 = 10.0;
const RATIO_POINTS: f64 = 10.0;

pub fn score(facts: &NormalizedFacts, config: &ScoringConfig) -> ComponentScore {
    let profile = &facts.profile.facts;
    let r = &facts.repos;
    let benchmarks = &config.impact;

    let follower_score = capped(profile.followers as f64, benchmarks.followers, FOLLOWER_POINTS);
    let fork_score = capped(r.total_forks as f64, benchmarks.forks, FORK_POINTS);

    let balanced_network = profile.followers > 0
        && profile.following > 0
        && profile.followers as f64 / profile.following as f64 >= benchmarks.follower_ratio;
    let collaboration_score = points_if(r.repos_with_forks > 0, FORKED_REPO_POINTS)
        + points_if(r.total_forks > benchmarks.open_source_forks, OPEN_SOURCE_POINTS)
        + points_if(balanced_network, RATIO_POINTS);

    let details = Details::new()
        .with_nested(
            "followers",
            scored(
                Details::new().with_scalar("count", profile.followers as f64),
                follower_score,
            ),
        )
        .with_nested(
            "forks",
            scored(
                Details::new().with_scalar("total_forks", r.total_forks as f64),
                fork_score,
            ),
        )
        .with_nested(
            "collaboration",
            scored(
                Details::new()
                    .with_scalar("repos_with_forks", r.repos_with_forks as f64)
                    .with_scalar("following", profile.following as f64)
                    .with_scalar(
                        "follower_ratio",
                        (facts.profile.follower_ratio * 100.0).round() / 100.0,
                    ),
                collaboration_score,
            ),
        );

    ComponentScore::new(
        ComponentKind::Impact,
        config.weights.impact,
        follower_score + fork_score + collaboration_score,
        details,
    )
}
