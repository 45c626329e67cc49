//! Facet derivation and option listing
//!
//! Raw geo and entity columns arrive as comma-joined strings. They are split
//! once per record at load time; filtering and aggregation only ever see the
//! derived lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::record::{ArticleRecord, EntityCategory, EntityMap};

/// Categorical dimensions a query can restrict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    City,
    Country,
    Topic,
    NewsType,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::City, Facet::Country, Facet::Topic, Facet::NewsType];

    pub fn as_str(self) -> &'static str {
        match self {
            Facet::City => "city",
            Facet::Country => "country",
            Facet::Topic => "topic",
            Facet::NewsType => "news_type",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a comma-joined cell into trimmed, non-empty tokens
///
/// Source order and duplicates are preserved. Idempotent:
/// `split_facet(&split_facet(s).join(","))` equals `split_facet(s)`.
///
/// # Examples
///
/// ```
/// use hlnd_common::facets::split_facet;
///
/// assert_eq!(split_facet(" Pune, ,Mumbai,Pune "), vec!["Pune", "Mumbai", "Pune"]);
/// assert!(split_facet("").is_empty());
/// ```
pub fn split_facet(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Derived multi-valued fields of one source row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedFacets {
    pub geo_cities: Vec<String>,
    pub geo_countries: Vec<String>,
    pub ner_entities: EntityMap,
}

/// Raw comma-joined cells feeding the derivation
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFacets<'a> {
    pub cities: Option<&'a str>,
    pub countries: Option<&'a str>,
    pub gpe: Option<&'a str>,
    pub loc: Option<&'a str>,
    pub org: Option<&'a str>,
    pub person: Option<&'a str>,
}

impl RawFacets<'_> {
    fn entity_cell(&self, category: EntityCategory) -> Option<&str> {
        match category {
            EntityCategory::Gpe => self.gpe,
            EntityCategory::Loc => self.loc,
            EntityCategory::Org => self.org,
            EntityCategory::Person => self.person,
        }
    }
}

/// Load-time facet annotation
pub struct FacetIndex;

impl FacetIndex {
    /// Derive the city, country and entity lists of one row
    ///
    /// A missing cell yields an empty list.
    pub fn derive(raw: &RawFacets<'_>) -> DerivedFacets {
        let split = |cell: Option<&str>| cell.map(split_facet).unwrap_or_default();

        let mut ner_entities = EntityMap::default();
        for category in EntityCategory::ALL {
            *ner_entities.get_mut(category) = split(raw.entity_cell(category));
        }

        DerivedFacets {
            geo_cities: split(raw.cities),
            geo_countries: split(raw.countries),
            ner_entities,
        }
    }

    /// Sorted distinct values available for a facet pick-list
    ///
    /// Cities and countries are listed per derived token, so a row tagged
    /// "Pune, Mumbai" contributes two options. Missing scalars are skipped.
    pub fn facet_options(records: &[ArticleRecord], facet: Facet) -> Vec<String> {
        let mut options: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            match facet {
                Facet::City => options.extend(record.geo_cities.iter().map(String::as_str)),
                Facet::Country => options.extend(record.geo_countries.iter().map(String::as_str)),
                Facet::Topic => options.extend(record.topic_label.as_deref()),
                Facet::NewsType => options.extend(record.news_type.as_deref()),
            }
        }

        options.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    #[test]
    fn test_split_trims_and_drops_empty_tokens() {
        assert_eq!(split_facet("Delhi,  Agra ,,"), vec!["Delhi", "Agra"]);
        assert!(split_facet(" , ,").is_empty());
    }

    #[test]
    fn test_split_keeps_order_and_duplicates() {
        assert_eq!(
            split_facet("Agra,Delhi,Agra"),
            vec!["Agra", "Delhi", "Agra"]
        );
    }

    #[test]
    fn test_split_is_idempotent() {
        let samples = ["a, b ,c", " ,x,, y ", "", "single", "dup, dup"];
        for raw in samples {
            let once = split_facet(raw);
            let twice = split_facet(&once.join(","));
            assert_eq!(once, twice, "re-splitting {:?} changed the list", raw);
        }
    }

    #[test]
    fn test_derive_handles_missing_cells() {
        let raw = RawFacets {
            cities: Some("Pune, Mumbai"),
            org: Some("ISRO,, NASA"),
            ..Default::default()
        };
        let derived = FacetIndex::derive(&raw);

        assert_eq!(derived.geo_cities, vec!["Pune", "Mumbai"]);
        assert!(derived.geo_countries.is_empty());
        assert_eq!(derived.ner_entities.org, vec!["ISRO", "NASA"]);
        assert!(derived.ner_entities.person.is_empty());
    }

    #[test]
    fn test_facet_options_sorted_and_distinct() {
        let mut a = ArticleRecord::new(RecordId(0));
        a.geo_cities = vec!["Pune".into(), "Agra".into()];
        a.topic_label = Some("weather".into());
        let mut b = ArticleRecord::new(RecordId(1));
        b.geo_cities = vec!["Agra".into()];
        b.topic_label = None;
        b.news_type = Some("local".into());

        let records = vec![a, b];
        assert_eq!(FacetIndex::facet_options(&records, Facet::City), vec!["Agra", "Pune"]);
        assert_eq!(FacetIndex::facet_options(&records, Facet::Topic), vec!["weather"]);
        assert_eq!(FacetIndex::facet_options(&records, Facet::NewsType), vec!["local"]);
        assert!(FacetIndex::facet_options(&records, Facet::Country).is_empty());
    }
}
