use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Activity,
    Documentation,
    Quality,
    Professionalism,
    Impact,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Activity,
        ComponentKind::Documentation,
        ComponentKind::Quality,
        ComponentKind::Professionalism,
        ComponentKind::Impact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ComponentKind::Activity => "Activity & Consistency",
            ComponentKind::Documentation => "Documentation & Readability",
            ComponentKind::Quality => "Project Quality & Originality",
            ComponentKind::Professionalism => "Professionalism & Branding",
            ComponentKind::Impact => "Impact & Collaboration",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Activity => write!(f, "activity"),
            ComponentKind::Documentation => write!(f, "documentation"),
            ComponentKind::Quality => write!(f, "quality"),
            ComponentKind::Professionalism => write!(f, "professionalism"),
            ComponentKind::Impact => write!(f, "impact"),
        }
    }
}

/// A sub-metric value: a number, a nested breakdown, or an explanatory note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    Scalar(f64),
    Nested(Details),
    Note(String),
}

/// Insertion-ordered sub-metric mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details(Vec<(String, DetailValue)>);

impl Details {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces `key`, keeping its original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: DetailValue) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with_scalar(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, DetailValue::Scalar(value));
        self
    }

    pub fn with_nested(mut self, key: impl Into<String>, value: Details) -> Self {
        self.insert(key, DetailValue::Nested(value));
        self
    }

    pub fn with_note(mut self, key: impl Into<String>, note: impl Into<String>) -> Self {
        self.insert(key, DetailValue::Note(note.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn scalar(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(DetailValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn nested(&self, key: &str) -> Option<&Details> {
        match self.get(key) {
            Some(DetailValue::Nested(d)) => Some(d),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    pub kind: ComponentKind,
    pub name: String,
    pub weight: f64,
    pub score: f64,
    pub details: Details,
}

impl ComponentScore {
    /// Clamps the raw score to [0, 100] and rounds it to one decimal.
    pub fn new(kind: ComponentKind, weight: f64, raw_score: f64, details: Details) -> Self {
        Self {
            kind,
            name: kind.title().to_string(),
            weight,
            score: round1(clamp_score(raw_score)),
            details,
        }
    }

    pub fn weighted_score(&self) -> f64 {
        self.score * self.weight / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub activity: ComponentScore,
    pub documentation: ComponentScore,
    pub quality: ComponentScore,
    pub professionalism: ComponentScore,
    pub impact: ComponentScore,
    pub final_score: f64,
    pub percentile_rank: PercentileRank,
}

impl ScoreBreakdown {
    pub fn components(&self) -> [&ComponentScore; 5] {
        [
            &self.activity,
            &self.documentation,
            &self.quality,
            &self.professionalism,
            &self.impact,
        ]
    }

    pub fn component(&self, kind: ComponentKind) -> &ComponentScore {
        match kind {
            ComponentKind::Activity => &self.activity,
            ComponentKind::Documentation => &self.documentation,
            ComponentKind::Quality => &self.quality,
            ComponentKind::Professionalism => &self.professionalism,
            ComponentKind::Impact => &self.impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileRank {
    #[serde(rename = "Top 5%")]
    Top5,
    #[serde(rename = "Top 15%")]
    Top15,
    #[serde(rename = "Top 30%")]
    Top30,
    #[serde(rename = "Top 50%")]
    Top50,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl PercentileRank {
    /// Ordered threshold table, highest band first.
    pub const TABLE: [(f64, PercentileRank); 4] = [
        (90.0, PercentileRank::Top5),
        (80.0, PercentileRank::Top15),
        (70.0, PercentileRank::Top30),
        (60.0, PercentileRank::Top50),
    ];

    pub fn from_score(score: f64) -> Self {
        Self::TABLE
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, rank)| *rank)
            .unwrap_or(PercentileRank::BelowAverage)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PercentileRank::Top5 => "Top 5%",
            PercentileRank::Top15 => "Top 15%",
            PercentileRank::Top30 => "Top 30%",
            PercentileRank::Top50 => "Top 50%",
            PercentileRank::BelowAverage => "Below Average",
        }
    }
}

impl std::fmt::Display for PercentileRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
