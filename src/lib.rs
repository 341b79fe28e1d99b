pub mod config;
pub mod error;
pub mod models;
pub mod taxonomy;
pub mod analysis;

pub use config::ScoringConfig;
pub use error::{Error, Result};
pub use analysis::{evaluate, Evaluation, ScoringEngine};
