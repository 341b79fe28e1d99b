pub mod languages;

pub use languages::canonical_language;

/// Name fragments that mark a repository as a tutorial or practice exercise.
pub const PRACTICE_KEYWORDS: &[&str] = &["tutorial", "practice", "learning", "course", "homework"];

/// Broader fragments used when judging whether a portfolio is mostly coursework.
pub const COURSEWORK_KEYWORDS: &[&str] = &[
    "tutorial",
    "practice",
    "learning",
    "course",
    "homework",
    "assignment",
    "test",
    "demo",
];

pub fn looks_like_practice(name: &str) -> bool {
    contains_any(name, PRACTICE_KEYWORDS)
}

pub fn looks_like_coursework(name: &str, description: Option<&str>) -> bool {
    contains_any(name, COURSEWORK_KEYWORDS)
        || description
            .map(|d| contains_any(d, COURSEWORK_KEYWORDS))
            .unwrap_or(false)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
