use crate::analysis::normalizer::NormalizedFacts;
use crate::analysis::scorers::{capped, percentage, proportional, scored};
use crate::config::ScoringConfig;
use crate::models::{ComponentKind, ComponentScore, Details};

const ENGAGEMENT_POINTS: f64 = 35.0;
const DIVERSITY_POINTS: f64 = 25.0;
const FRESHNESS_POINTS: f64 = 20.0;
const ORIGINALITY_POINTS: f64 = 20.0;

pub fn score(facts: &NormalizedFacts, config: &ScoringConfig) -> ComponentScore {
    let r = &facts.repos;
    let benchmarks = &config.quality;
    let mut details = Details::new();
    if r.total_repos == 0 {
        details = details.with_note("note", "No repositories found");
    }

    let engagement_score = capped(r.engagement as f64, benchmarks.engagement, ENGAGEMENT_POINTS);
    details = details.with_nested(
        "engagement",
        scored(
            Details::new()
                .with_scalar("total_stars", r.total_stars as f64)
                .with_scalar("total_forks", r.total_forks as f64)
                .with_scalar("engagement_value", r.engagement as f64),
            engagement_score,
        ),
    );

    let diversity_score = capped(
        r.unique_language_count as f64,
        benchmarks.languages,
        DIVERSITY_POINTS,
    );
    let mut diversity = Details::new().with_scalar("unique_languages", r.unique_language_count as f64);
    if let Some(primary) = &r.primary_language {
        diversity = diversity.with_note("primary_language", primary.clone());
    }
    details = details.with_nested("language_diversity", scored(diversity, diversity_score));

    let freshness_score = proportional(r.freshness_ratio, FRESHNESS_POINTS);
    details = details.with_nested(
        "project_freshness",
        scored(
            Details::new()
                .with_scalar("recently_updated", r.recently_updated as f64)
                .with_scalar("percentage", percentage(r.freshness_ratio)),
            freshness_score,
        ),
    );

    let originality_score = proportional(r.originality_ratio, ORIGINALITY_POINTS);
    details = details.with_nested(
        "originality",
        scored(
            Details::new()
                .with_scalar("original_projects", r.original_projects as f64)
                .with_scalar("percentage", percentage(r.originality_ratio)),
            originality_score,
        ),
    );

    ComponentScore::new(
        ComponentKind::Quality,
        config.weights.quality,
        engagement_score + diversity_score + freshness_score + originality_score,
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{facts_with_repos, repo};

    #[test]
    fn test_engagement_is_monotonic() {
        let config = ScoringConfig::default();
        let mut previous = -1.0;
        for stars in [0, 5, 20, 49, 50, 51, 500] {
            let mut r = repo("lib");
            r.stars = stars;
            let component = score(&facts_with_repos(vec![r]), &config);
            assert!(component.score >= previous, "stars={}", stars);
            previous = component.score;
        }

        let mut forked = repo("lib");
        forked.stars = 10;
        let base = score(&facts_with_repos(vec![forked.clone()]), &config).score;
        forked.forks = 3;
        assert!(score(&facts_with_repos(vec![forked]), &config).score >= base);
    }

    #[test]
    fn test_engagement_counts_forks_twice() {
        let mut r = repo("lib");
        r.stars = 10;
        r.forks = 5;
        let component = score(&facts_with_repos(vec![r]), &ScoringConfig::default());
        let engagement = component.details.nested("engagement").unwrap();
        assert_eq!(engagement.scalar("engagement_value"), Some(20.0));
        assert_eq!(engagement.scalar("score"), Some(14.0));
    }

    #[test]
    fn test_no_repositories_score_zero() {
        let component = score(&facts_with_repos(Vec::new()), &ScoringConfig::default());
        assert_eq!(component.score, 0.0);
    }

    #[test]
    fn test_max_quality() {
        let repos = ["Rust", "Go", "Python", "TypeScript", "C"]
            .iter()
            .enumerate()
            .map(|(i, lang)| {
                let mut r = repo(&format!("project-{}", i));
                r.language = Some(lang.to_string());
                r.stars = 20;
                r
            })
            .collect();
        let component = score(&facts_with_repos(repos), &ScoringConfig::default());
        assert_eq!(component.score, 100.0);
    }
}
