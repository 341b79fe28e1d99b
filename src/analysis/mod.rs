pub mod activity;
pub mod aggregator;
pub mod engine;
pub mod insights;
pub mod normalizer;
pub mod scorers;
pub mod streak;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity::ActivityAnalyzer;
pub use aggregator::aggregate;
pub use engine::{evaluate, Evaluation, ScoringEngine};
pub use insights::{InsightDetector, InsightRule, RULES};
pub use normalizer::{NormalizedFacts, Normalizer};
