//! Composite article filter
//!
//! A `FilterSpec` is a conjunction of independently optional predicates. It is
//! built fresh for every query and evaluated against every record in one
//! scan; the subset keeps source order.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::FilterError;
use crate::facets::Facet;
use crate::record::ArticleRecord;
use crate::store::{NumericField, RecordStore};

/// Records that passed a filter, in source order
pub type Subset<'a> = Vec<&'a ArticleRecord>;

/// Borrow every record as a subset, without filtering
pub fn as_subset(records: &[ArticleRecord]) -> Subset<'_> {
    records.iter().collect()
}

/// Non-empty set of facet values
///
/// There is no way to build an empty `FacetSet`, so a `Selection` can never
/// silently mean "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetSet(BTreeSet<String>);

impl FacetSet {
    pub fn new<I, S>(facet: Facet, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(FilterError::EmptySelection(facet));
        }
        Ok(Self(set))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    /// True if any of `values` is a member
    pub fn intersects(&self, values: &[String]) -> bool {
        values.iter().any(|v| self.0.contains(v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Restriction on one facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "values", rename_all = "snake_case")]
pub enum Selection {
    /// No restriction on this facet
    #[default]
    AllSelected,
    Specific(FacetSet),
}

impl Selection {
    pub fn specific<I, S>(facet: Facet, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FacetSet::new(facet, values).map(Selection::Specific)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::AllSelected)
    }

    /// Scalar facets: the value must be a member; a missing value never is
    fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selection::AllSelected => true,
            Selection::Specific(set) => value.is_some_and(|v| set.contains(v)),
        }
    }

    /// List facets: any member of the list may match
    fn admits_any(&self, values: &[String]) -> bool {
        match self {
            Selection::AllSelected => true,
            Selection::Specific(set) => set.intersects(values),
        }
    }
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Result<Self, FilterError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FilterError::NonFiniteBound);
        }
        if min > max {
            return Err(FilterError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// A missing value is never inside a range
    pub fn contains(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => self.min <= v && v <= self.max,
            None => false,
        }
    }
}

/// Case-insensitive substring needle, lowered once at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Blank input is no keyword at all; anything else is kept verbatim,
    /// surrounding spaces included
    pub fn new(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn found_in(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|text| text.to_lowercase().contains(&self.0))
    }
}

/// Complete query over the record set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    pub city_selection: Selection,
    pub country_selection: Selection,
    pub topic_selection: Selection,
    pub news_type_selection: Selection,
    pub keyword: Option<Keyword>,
    pub topic_keyword: Option<Keyword>,
    pub score_range: Option<ValueRange>,
    pub sentiment_range: Option<ValueRange>,
    pub anomaly_only: bool,
}

impl FilterSpec {
    pub fn builder() -> FilterSpecBuilder {
        FilterSpecBuilder::default()
    }

    /// Spec under which every record passes
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Spec whose ranges span the store bounds and nothing else
    ///
    /// Matches the dashboard's initial slider positions. Records with a
    /// missing score or sentiment fail these ranges.
    pub fn with_full_ranges(store: &RecordStore) -> Self {
        let to_range = |field| {
            store
                .bound(field)
                .and_then(|b| ValueRange::new(b.min, b.max).ok())
        };
        Self {
            score_range: to_range(NumericField::AnomalyScore),
            sentiment_range: to_range(NumericField::SentimentCompound),
            ..Self::default()
        }
    }

    pub fn selection(&self, facet: Facet) -> &Selection {
        match facet {
            Facet::City => &self.city_selection,
            Facet::Country => &self.country_selection,
            Facet::Topic => &self.topic_selection,
            Facet::NewsType => &self.news_type_selection,
        }
    }

    /// Evaluate every active predicate against one record
    ///
    /// Flag, set membership and range checks run before the substring scans.
    pub fn matches(&self, record: &ArticleRecord) -> bool {
        if self.anomaly_only && !record.is_anomaly {
            return false;
        }
        if !self.topic_selection.admits(record.topic_label.as_deref())
            || !self.news_type_selection.admits(record.news_type.as_deref())
            || !self.city_selection.admits_any(&record.geo_cities)
            || !self.country_selection.admits_any(&record.geo_countries)
        {
            return false;
        }
        if let Some(range) = &self.score_range {
            if !range.contains(record.anomaly_score) {
                return false;
            }
        }
        if let Some(range) = &self.sentiment_range {
            if !range.contains(record.sentiment_compound) {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            if !keyword.found_in(record.raw_text.as_deref()) {
                return false;
            }
        }
        if let Some(keyword) = &self.topic_keyword {
            if !keyword.found_in(record.topic_label.as_deref()) {
                return false;
            }
        }
        true
    }
}

/// Validating constructor for `FilterSpec`
///
/// Facet values are collected as given and checked in `build`, so an empty
/// list surfaces as `FilterError::EmptySelection` rather than a silent
/// match-nothing filter.
#[derive(Debug, Clone, Default)]
pub struct FilterSpecBuilder {
    cities: Option<Vec<String>>,
    countries: Option<Vec<String>>,
    topics: Option<Vec<String>>,
    news_types: Option<Vec<String>>,
    keyword: Option<String>,
    topic_keyword: Option<String>,
    score_range: Option<(f64, f64)>,
    sentiment_range: Option<(f64, f64)>,
    anomaly_only: bool,
}

fn collect<I, S>(values: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(values.into_iter().map(Into::into).collect())
}

impl FilterSpecBuilder {
    pub fn cities<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.cities = collect(values);
        self
    }

    pub fn countries<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.countries = collect(values);
        self
    }

    pub fn topics<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.topics = collect(values);
        self
    }

    pub fn news_types<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.news_types = collect(values);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn topic_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.topic_keyword = Some(keyword.into());
        self
    }

    pub fn score_range(mut self, min: f64, max: f64) -> Self {
        self.score_range = Some((min, max));
        self
    }

    pub fn sentiment_range(mut self, min: f64, max: f64) -> Self {
        self.sentiment_range = Some((min, max));
        self
    }

    pub fn anomaly_only(mut self, anomaly_only: bool) -> Self {
        self.anomaly_only = anomaly_only;
        self
    }

    pub fn build(self) -> Result<FilterSpec, FilterError> {
        let selection = |facet: Facet, values: Option<Vec<String>>| match values {
            None => Ok(Selection::AllSelected),
            Some(values) => Selection::specific(facet, values),
        };
        let range = |bounds: Option<(f64, f64)>| {
            bounds.map(|(min, max)| ValueRange::new(min, max)).transpose()
        };

        Ok(FilterSpec {
            city_selection: selection(Facet::City, self.cities)?,
            country_selection: selection(Facet::Country, self.countries)?,
            topic_selection: selection(Facet::Topic, self.topics)?,
            news_type_selection: selection(Facet::NewsType, self.news_types)?,
            keyword: self.keyword.as_deref().and_then(Keyword::new),
            topic_keyword: self.topic_keyword.as_deref().and_then(Keyword::new),
            score_range: range(self.score_range)?,
            sentiment_range: range(self.sentiment_range)?,
            anomaly_only: self.anomaly_only,
        })
    }
}

/// Full-scan evaluation of a spec
pub struct FilterEngine;

impl FilterEngine {
    /// Records satisfying every active predicate, in source order
    pub fn apply<'a>(spec: &FilterSpec, records: &'a [ArticleRecord]) -> Subset<'a> {
        let subset: Subset<'a> = records.iter().filter(|r| spec.matches(r)).collect();
        debug!("Filter kept {} of {} articles", subset.len(), records.len());
        subset
    }
}
