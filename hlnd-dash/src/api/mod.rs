//! HTTP API handlers for hlnd-dash
//!
//! Every `POST` handler takes a `FilterRequest` body, builds a fresh
//! `FilterSpec` and scans the store once.

pub mod articles;
pub mod buildinfo;
pub mod dashboard;
pub mod entities;
pub mod health;
pub mod map;
pub mod options;
pub mod reader;

pub use articles::list_articles;
pub use buildinfo::get_build_info;
pub use dashboard::get_dashboard;
pub use entities::get_entity_table;
pub use health::health_routes;
pub use map::get_map_points;
pub use options::{get_bounds, get_facets};
pub use reader::get_reader_article;

use hlnd_common::{FilterEngine, Subset};
use serde::Serialize;

use crate::{error::ApiResult, request::FilterRequest, AppState};

/// One row of a ranked frequency table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: usize,
}

pub(crate) fn ranked_entries(table: Vec<(String, usize)>) -> Vec<RankedEntry> {
    table
        .into_iter()
        .map(|(label, count)| RankedEntry { label, count })
        .collect()
}

/// Validate the request and run it against the store
pub(crate) fn filtered<'a>(state: &'a AppState, request: &FilterRequest) -> ApiResult<Subset<'a>> {
    let spec = request.to_spec()?;
    Ok(FilterEngine::apply(&spec, state.store.all_records()))
}
