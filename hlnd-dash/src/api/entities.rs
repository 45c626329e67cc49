//! Entity frequency table for a single NER category

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use hlnd_common::{AggregationEngine, EntityCategory};
use serde::Serialize;

use super::{filtered, ranked_entries, RankedEntry};
use crate::{error::ApiResult, request::FilterRequest, AppState};

#[derive(Debug, Serialize)]
pub struct EntityTableResponse {
    pub category: EntityCategory,
    pub entries: Vec<RankedEntry>,
}

/// POST /api/entities/:category
///
/// `category` is `gpe`, `loc`, `org` or `person` (the `ner_` column prefix is
/// accepted too). Anything else is a 400.
pub async fn get_entity_table(
    State(state): State<AppState>,
    Path(category): Path<String>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<EntityTableResponse>> {
    let Json(request) = body?;
    let category: EntityCategory = category.parse()?;
    let subset = filtered(&state, &request)?;

    let table =
        AggregationEngine::entity_frequencies(&subset, category, state.settings.top_entities);

    Ok(Json(EntityTableResponse {
        category,
        entries: ranked_entries(table),
    }))
}
