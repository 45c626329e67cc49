//! Article record model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Stable row identifier assigned at load time (zero-based, source order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named-entity categories produced by the upstream NER pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    /// Geo-political entities (countries, cities, states)
    Gpe,
    /// Non-GPE locations (mountains, rivers, regions)
    Loc,
    Org,
    Person,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Gpe,
        EntityCategory::Loc,
        EntityCategory::Org,
        EntityCategory::Person,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityCategory::Gpe => "gpe",
            EntityCategory::Loc => "loc",
            EntityCategory::Org => "org",
            EntityCategory::Person => "person",
        }
    }

    /// Source column holding the comma-joined entities of this category
    pub fn column(self) -> &'static str {
        match self {
            EntityCategory::Gpe => "ner_gpe",
            EntityCategory::Loc => "ner_loc",
            EntityCategory::Org => "ner_org",
            EntityCategory::Person => "ner_person",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityCategory {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("ner_").unwrap_or(lowered.as_str());
        match name {
            "gpe" => Ok(EntityCategory::Gpe),
            "loc" => Ok(EntityCategory::Loc),
            "org" => Ok(EntityCategory::Org),
            "person" => Ok(EntityCategory::Person),
            _ => Err(FilterError::UnknownCategory(s.to_string())),
        }
    }
}

/// Per-category entity lists of one article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMap {
    pub gpe: Vec<String>,
    pub loc: Vec<String>,
    pub org: Vec<String>,
    pub person: Vec<String>,
}

impl EntityMap {
    pub fn get(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::Gpe => &self.gpe,
            EntityCategory::Loc => &self.loc,
            EntityCategory::Org => &self.org,
            EntityCategory::Person => &self.person,
        }
    }

    pub fn get_mut(&mut self, category: EntityCategory) -> &mut Vec<String> {
        match category {
            EntityCategory::Gpe => &mut self.gpe,
            EntityCategory::Loc => &mut self.loc,
            EntityCategory::Org => &mut self.org,
            EntityCategory::Person => &mut self.person,
        }
    }
}

/// One precomputed news article
///
/// Immutable after load. Optional fields are `None` when the source cell was
/// empty or could not be parsed; a `None` numeric never satisfies a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: RecordId,
    pub raw_text: Option<String>,
    pub topic_label: Option<String>,
    pub news_type: Option<String>,
    pub sentiment_compound: Option<f64>,
    pub anomaly_score: Option<f64>,
    pub is_anomaly: bool,
    pub geo_cities: Vec<String>,
    pub geo_countries: Vec<String>,
    pub ner_entities: EntityMap,
}

impl ArticleRecord {
    /// Bare record with every optional field missing
    ///
    /// Mostly useful for building fixtures with struct update syntax.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            raw_text: None,
            topic_label: None,
            news_type: None,
            sentiment_compound: None,
            anomaly_score: None,
            is_anomaly: false,
            geo_cities: Vec::new(),
            geo_countries: Vec::new(),
            ner_entities: EntityMap::default(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic_label.as_deref()
    }

    pub fn entities(&self, category: EntityCategory) -> &[String] {
        self.ner_entities.get(category)
    }
}
