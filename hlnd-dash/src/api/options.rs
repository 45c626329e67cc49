//! Filter control data: facet pick-lists and slider bounds
//!
//! Both are derived from the full store, never from a filtered subset, so the
//! controls do not shrink as the user narrows the view.

use axum::{extract::State, Json};
use hlnd_common::{Bounds, Facet, FacetIndex, NumericField};
use serde::Serialize;

use crate::AppState;

/// Sorted distinct options per facet
#[derive(Debug, Serialize)]
pub struct FacetOptionsResponse {
    pub cities: Vec<String>,
    pub countries: Vec<String>,
    pub topics: Vec<String>,
    pub news_types: Vec<String>,
}

/// Store-wide numeric bounds (`null` when no record carries the field)
#[derive(Debug, Serialize)]
pub struct BoundsResponse {
    pub anomaly_score: Option<Bounds>,
    pub sentiment_compound: Option<Bounds>,
}

/// GET /api/facets
pub async fn get_facets(State(state): State<AppState>) -> Json<FacetOptionsResponse> {
    let records = state.store.all_records();
    Json(FacetOptionsResponse {
        cities: FacetIndex::facet_options(records, Facet::City),
        countries: FacetIndex::facet_options(records, Facet::Country),
        topics: FacetIndex::facet_options(records, Facet::Topic),
        news_types: FacetIndex::facet_options(records, Facet::NewsType),
    })
}

/// GET /api/bounds
pub async fn get_bounds(State(state): State<AppState>) -> Json<BoundsResponse> {
    Json(BoundsResponse {
        anomaly_score: state.store.bound(NumericField::AnomalyScore),
        sentiment_compound: state.store.bound(NumericField::SentimentCompound),
    })
}
