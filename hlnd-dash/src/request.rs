//! JSON filter request bodies
//!
//! Facet fields are omitted (or null) for "all selected" and a non-empty
//! array otherwise. Validation is left to `FilterSpecBuilder::build`, so an
//! empty array comes back as `FilterError::EmptySelection`.

use hlnd_common::{FilterError, FilterSpec, RecordId};
use serde::Deserialize;

/// Body of every filtered `POST` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub cities: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
    pub topics: Option<Vec<String>>,
    pub news_types: Option<Vec<String>>,
    /// Case-insensitive substring of the article text
    pub keyword: Option<String>,
    /// Case-insensitive substring of the topic label
    pub topic_keyword: Option<String>,
    /// `[min, max]`, inclusive
    pub score_range: Option<[f64; 2]>,
    /// `[min, max]`, inclusive
    pub sentiment_range: Option<[f64; 2]>,
    pub anomaly_only: bool,
}

impl FilterRequest {
    /// Validate and convert into a `FilterSpec`
    pub fn to_spec(&self) -> Result<FilterSpec, FilterError> {
        let mut builder = FilterSpec::builder().anomaly_only(self.anomaly_only);

        if let Some(values) = &self.cities {
            builder = builder.cities(values.iter().cloned());
        }
        if let Some(values) = &self.countries {
            builder = builder.countries(values.iter().cloned());
        }
        if let Some(values) = &self.topics {
            builder = builder.topics(values.iter().cloned());
        }
        if let Some(values) = &self.news_types {
            builder = builder.news_types(values.iter().cloned());
        }
        if let Some(keyword) = &self.keyword {
            builder = builder.keyword(keyword.as_str());
        }
        if let Some(keyword) = &self.topic_keyword {
            builder = builder.topic_keyword(keyword.as_str());
        }
        if let Some([min, max]) = self.score_range {
            builder = builder.score_range(min, max);
        }
        if let Some([min, max]) = self.sentiment_range {
            builder = builder.sentiment_range(min, max);
        }

        builder.build()
    }
}

/// Body of `POST /api/reader/article`
///
/// The id wins when both are given; text lookup returns the first exact
/// match in the filtered subset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderRequest {
    #[serde(default)]
    pub filter: FilterRequest,
    pub id: Option<RecordId>,
    pub text: Option<String>,
}
