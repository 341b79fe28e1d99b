use crate::analysis::normalizer::NormalizedFacts;
use crate::analysis::scorers::{percentage, points_if, proportional, scored};
use crate::config::ScoringConfig;
use crate::models::{ComponentKind, ComponentScore, Details};

const COMPLETENESS_POINTS: f64 = 40.0;
const BIO_POINTS: f64 = 15.0;
const HIREABLE_POINTS: f64 = 10.0;
const PORTFOLIO_POINTS: f64 = 5.0;
const WEBSITE_POINTS: f64 = 15.0;
const SOCIAL_POINTS: f64 = 10.0;
const COMPANY_POINTS: f64 = 5.0;

pub fn score(facts: &NormalizedFacts, config: &ScoringConfig) -> ComponentScore {
    let p = &facts.profile;
    let profile = &p.facts;
    let benchmarks = &config.professionalism;

    let completeness_score = proportional(p.profile_completeness_ratio, COMPLETENESS_POINTS);
    let completeness = scored(
        Details::new()
            .with_scalar("filled_fields", p.filled_fields as f64)
            .with_scalar("total_fields", p.total_fields as f64)
            .with_scalar("percentage", percentage(p.profile_completeness_ratio)),
        completeness_score,
    );

    let bio_length = profile.bio_length();
    let presentation_score = points_if(bio_length > benchmarks.meaningful_bio_length, BIO_POINTS)
        + points_if(profile.hireable, HIREABLE_POINTS)
        + points_if(
            profile.public_repos >= benchmarks.portfolio_repo_count,
            PORTFOLIO_POINTS,
        );
    let presentation = scored(
        Details::new()
            .with_scalar("has_bio", flag(profile.has_bio()))
            .with_scalar("bio_length", bio_length as f64)
            .with_scalar("hireable", flag(profile.hireable))
            .with_scalar("public_repos", profile.public_repos as f64),
        presentation_score,
    );

    let presence_score = points_if(profile.has_website(), WEBSITE_POINTS)
        + points_if(profile.has_social(), SOCIAL_POINTS)
        + points_if(profile.has_company, COMPANY_POINTS);
    let presence = scored(
        Details::new()
            .with_scalar("has_website", flag(profile.has_website()))
            .with_scalar("has_social", flag(profile.has_social()))
            .with_scalar("has_company", flag(profile.has_company)),
        presence_score,
    );

    let details = Details::new()
        .with_nested("profile_completeness", completeness)
        .with_nested("presentation", presentation)
        .with_nested("online_presence", presence);

    ComponentScore::new(
        ComponentKind::Professionalism,
        config.weights.professionalism,
        completeness_score + presentation_score + presence_score,
        details,
    )
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
