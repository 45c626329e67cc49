//! # Hyperlocal News Dashboard Common Library
//!
//! Filter and aggregation engine shared by the dashboard service:
//! - Dataset loading and numeric bounds (`store`)
//! - Facet derivation from comma-joined columns (`facets`)
//! - Composite filter evaluation (`filter`)
//! - Summary metrics and frequency tables (`aggregate`)
//! - Article reader pick-list (`reader`)
//! - Placeholder map coordinates (`geo`)
//! - Configuration loading

pub mod aggregate;
pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod geo;
pub mod reader;
pub mod record;
pub mod store;

pub use aggregate::{AggregationEngine, AnomalyBreakdown, Histogram, HistogramBin, Metrics};
pub use error::{Error, FilterError, LoadError, Result};
pub use facets::{Facet, FacetIndex};
pub use filter::{FilterEngine, FilterSpec, Selection, Subset, ValueRange};
pub use geo::{map_points, placeholder_coordinates, MapPoint, MapRegion};
pub use reader::SampleReader;
pub use record::{ArticleRecord, EntityCategory, RecordId};
pub use store::{Bounds, NumericField, RecordStore};
