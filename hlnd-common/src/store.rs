//! Read-only article dataset
//!
//! The dataset is a CSV export of the upstream NLP pipeline. It is loaded
//! once, annotated with derived facets, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::facets::{FacetIndex, RawFacets};
use crate::record::{ArticleRecord, RecordId};

/// Columns every dataset must carry (extra columns are ignored)
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "raw_article",
    "geotext_cities",
    "geotext_countries",
    "topic_label",
    "NewsType_final",
    "sentiment_compound",
    "anomaly_score",
    "is_anomaly",
    "ner_gpe",
    "ner_loc",
    "ner_org",
    "ner_person",
];

/// Numeric fields with precomputed bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    AnomalyScore,
    SentimentCompound,
}

impl NumericField {
    pub fn value(self, record: &ArticleRecord) -> Option<f64> {
        match self {
            NumericField::AnomalyScore => record.anomaly_score,
            NumericField::SentimentCompound => record.sentiment_compound,
        }
    }
}

/// Inclusive min/max over the non-missing values of a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Bounds of the present values, `None` if there are none
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        values.into_iter().flatten().fold(None, |acc, v| match acc {
            None => Some(Bounds { min: v, max: v }),
            Some(b) => Some(Bounds {
                min: b.min.min(v),
                max: b.max.max(v),
            }),
        })
    }
}

/// Load statistics for operator feedback
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows_loaded: usize,
    /// Rows the CSV reader could not decode (bad quoting, invalid UTF-8)
    pub rows_skipped: usize,
    /// Missing or unparseable anomaly scores
    pub missing_anomaly_scores: usize,
    /// Missing or unparseable sentiment values
    pub missing_sentiments: usize,
    /// `is_anomaly` cells that were neither true nor false (read as false)
    pub unparseable_flags: usize,
}

/// One CSV row as written by the pipeline, before any interpretation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticleRow {
    raw_article: Option<String>,
    geotext_cities: Option<String>,
    geotext_countries: Option<String>,
    topic_label: Option<String>,
    #[serde(rename = "NewsType_final")]
    news_type: Option<String>,
    sentiment_compound: Option<String>,
    anomaly_score: Option<String>,
    is_anomaly: Option<String>,
    ner_gpe: Option<String>,
    ner_loc: Option<String>,
    ner_org: Option<String>,
    ner_person: Option<String>,
}

/// Owner of every article for the process lifetime
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<ArticleRecord>,
    anomaly_bounds: Option<Bounds>,
    sentiment_bounds: Option<Bounds>,
    report: LoadReport,
}

impl RecordStore {
    /// Load the dataset from a CSV file
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file is missing or unreadable, lacks a
    /// required column, or holds no article rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        info!("Loading article dataset from {}", path.display());
        Self::from_reader(file)
    }

    /// Load the dataset from any CSV byte source
    pub fn from_reader<R: Read>(source: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::Empty);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let mut report = LoadReport::default();
        let mut records = Vec::new();

        for row in reader.deserialize::<RawArticleRow>() {
            let row = match row {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    warn!("Skipping unreadable dataset row at line {}: {}", line, e);
                    report.rows_skipped += 1;
                    continue;
                }
            };

            let record = build_record(RecordId(records.len()), row, &mut report);
            records.push(record);
        }

        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        report.rows_loaded = records.len();

        let store = Self::with_report(records, report);
        info!(
            "Loaded {} articles ({} skipped, {} without anomaly score, {} without sentiment)",
            store.report.rows_loaded,
            store.report.rows_skipped,
            store.report.missing_anomaly_scores,
            store.report.missing_sentiments
        );
        Ok(store)
    }

    /// Build a store from already-derived records
    ///
    /// Identifiers are reassigned in slice order so that `get` stays a direct
    /// index lookup.
    pub fn from_records(mut records: Vec<ArticleRecord>) -> Self {
        for (index, record) in records.iter_mut().enumerate() {
            record.id = RecordId(index);
        }

        let report = LoadReport {
            rows_loaded: records.len(),
            missing_anomaly_scores: records.iter().filter(|r| r.anomaly_score.is_none()).count(),
            missing_sentiments: records.iter().filter(|r| r.sentiment_compound.is_none()).count(),
            ..Default::default()
        };
        Self::with_report(records, report)
    }

    fn with_report(records: Vec<ArticleRecord>, report: LoadReport) -> Self {
        let anomaly_bounds = Bounds::of(records.iter().map(|r| r.anomaly_score));
        let sentiment_bounds = Bounds::of(records.iter().map(|r| r.sentiment_compound));
        debug!(
            "Computed bounds: anomaly_score={:?}, sentiment_compound={:?}",
            anomaly_bounds, sentiment_bounds
        );

        Self {
            records,
            anomaly_bounds,
            sentiment_bounds,
            report,
        }
    }

    /// Every record, in source order
    pub fn all_records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&ArticleRecord> {
        self.records.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Precomputed bounds of a numeric field
    ///
    /// `None` when no record carries a value for the field.
    pub fn bound(&self, field: NumericField) -> Option<Bounds> {
        match field {
            NumericField::AnomalyScore => self.anomaly_bounds,
            NumericField::SentimentCompound => self.sentiment_bounds,
        }
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }
}

fn build_record(id: RecordId, row: RawArticleRow, report: &mut LoadReport) -> ArticleRecord {
    let derived = FacetIndex::derive(&RawFacets {
        cities: row.geotext_cities.as_deref(),
        countries: row.geotext_countries.as_deref(),
        gpe: row.ner_gpe.as_deref(),
        loc: row.ner_loc.as_deref(),
        org: row.ner_org.as_deref(),
        person: row.ner_person.as_deref(),
    });

    let anomaly_score = parse_measure(row.anomaly_score.as_deref());
    if anomaly_score.is_none() {
        report.missing_anomaly_scores += 1;
    }
    let sentiment_compound = parse_measure(row.sentiment_compound.as_deref());
    if sentiment_compound.is_none() {
        report.missing_sentiments += 1;
    }

    let is_anomaly = match parse_flag(row.is_anomaly.as_deref()) {
        Some(flag) => flag,
        None => {
            if row.is_anomaly.as_deref().is_some_and(|s| !s.trim().is_empty()) {
                report.unparseable_flags += 1;
            }
            false
        }
    };

    ArticleRecord {
        id,
        raw_text: non_blank(row.raw_article),
        topic_label: non_blank(row.topic_label),
        news_type: non_blank(row.news_type),
        sentiment_compound,
        anomaly_score,
        is_anomaly,
        geo_cities: derived.geo_cities,
        geo_countries: derived.geo_countries,
        ner_entities: derived.ner_entities,
    }
}

/// Parse a numeric cell; empty, unparseable and non-finite values are missing
pub fn parse_measure(cell: Option<&str>) -> Option<f64> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a boolean cell as written by pandas or by hand
pub fn parse_flag(cell: Option<&str>) -> Option<bool> {
    match cell?.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "1.0" | "yes" => Some(true),
        "false" | "f" | "0" | "0.0" | "no" => Some(false),
        _ => None,
    }
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}
