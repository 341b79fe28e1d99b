use crate::analysis::normalizer::NormalizedFacts;
use crate::analysis::scorers::{percentage, proportional, scored};
use crate::config::ScoringConfig;
use crate::models::{ComponentKind, ComponentScore, Details};

const README_POINTS: f64 = 50.0;
const DESCRIPTION_POINTS: f64 = 30.0;
const WIKI_POINTS: f64 = 7.0;
const PAGES_POINTS: f64 = 7.0;
const ISSUES_POINTS: f64 = 6.0;

pub fn score(facts: &NormalizedFacts, config: &ScoringConfig) -> ComponentScore {
    let r = &facts.repos;
    let mut details = Details::new();
    if r.total_repos == 0 {
        details = details.with_note("note", "No repositories found");
    }

    let readme_score = proportional(r.readme_ratio, README_POINTS);
    details = details.with_nested(
        "readme_coverage",
        scored(
            Details::new()
                .with_scalar("repos_with_readme", r.repos_with_readme as f64)
                .with_scalar("total_repos", r.total_repos as f64)
                .with_scalar("percentage", percentage(r.readme_ratio)),
            readme_score,
        ),
    );

    let description_score = proportional(r.description_ratio, DESCRIPTION_POINTS);
    details = details.with_nested(
        "description_coverage",
        scored(
            Details::new()
                .with_scalar("repos_with_description", r.repos_with_description as f64)
                .with_scalar("percentage", percentage(r.description_ratio)),
            description_score,
        ),
    );

    let feature_score = proportional(r.wiki_ratio, WIKI_POINTS)
        + proportional(r.pages_ratio, PAGES_POINTS)
        + proportional(r.issues_ratio, ISSUES_POINTS);
    details = details.with_nested(
        "documentation_features",
        scored(
            Details::new()
                .with_scalar("wikis_enabled", r.wiki_enabled as f64)
                .with_scalar("pages_enabled", r.pages_enabled as f64)
                .with_scalar("issues_enabled", r.issues_enabled as f64),
            feature_score,
        ),
    );

    ComponentScore::new(
        ComponentKind::Documentation,
        config.weights.documentation,
        readme_score + description_score + feature_score,
        details,
    )
}
