use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity-independent snapshot of a developer's profile metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFacts {
    pub has_name: bool,
    pub bio: Option<String>,
    pub has_location: bool,
    pub has_email: bool,
    pub has_company: bool,
    pub website: Option<String>,
    pub social_handle: Option<String>,
    pub hireable: bool,
    pub account_age_days: i64,
    pub followers: i64,
    pub following: i64,
    pub public_repos: i64,
}

impl ProfileFacts {
    pub fn bio_length(&self) -> usize {
        self.bio.as_deref().map(|b| b.trim().chars().count()).unwrap_or(0)
    }

    pub fn has_bio(&self) -> bool {
        self.bio_length() > 0
    }

    pub fn has_website(&self) -> bool {
        self.website.as_deref().map(|w| !w.trim().is_empty()).unwrap_or(false)
    }

    pub fn has_social(&self) -> bool {
        self.social_handle
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFacts {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub forks: i64,
    #[serde(default)]
    pub language: Option<String>,
    /// Secondary languages detected in the repository, if known.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub has_readme: bool,
    #[serde(default)]
    pub size_kb: i64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub has_issues: bool,
    #[serde(default)]
    pub is_fork: bool,
}

impl RepositoryFacts {
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }

    /// Name looks like a tutorial or practice repository.
    pub fn is_likely_tutorial(&self) -> bool {
        crate::taxonomy::looks_like_practice(&self.name)
    }

    /// Name or description looks like coursework, a demo, or a test scratchpad.
    pub fn is_likely_coursework(&self) -> bool {
        crate::taxonomy::looks_like_coursework(&self.name, self.description.as_deref())
    }
}
