use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Strength,
    Weakness,
    RedFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Moderate,
    Minor,
}

/// Impact for strengths, severity for weaknesses and red flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Significance {
    Impact(Impact),
    Severity(Severity),
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Significance::Impact(i) => write!(f, "{:?}", i),
            Significance::Severity(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub category: String,
    pub title: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub significance: Significance,
    /// Suggestion for weaknesses, recruiter perspective and fix for red flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub strengths: Vec<Insight>,
    pub weaknesses: Vec<Insight>,
    pub red_flags: Vec<Insight>,
}

impl Insights {
    pub fn push(&mut self, insight: Insight) {
        match insight.kind {
            InsightKind::Strength => self.strengths.push(insight),
            InsightKind::Weakness => self.weaknesses.push(insight),
            InsightKind::RedFlag => self.red_flags.push(insight),
        }
    }

    pub fn len(&self) -> usize {
        self.strengths.len() + self.weaknesses.len() + self.red_flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Insight> {
        self.strengths
            .iter()
            .chain(self.weaknesses.iter())
            .chain(self.red_flags.iter())
    }

    pub fn find(&self, title: &str) -> Option<&Insight> {
        self.iter().find(|i| i.title == title)
    }
}
