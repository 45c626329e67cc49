//! Map points for the filtered articles
//!
//! Coordinates are random placeholders inside the configured region; every
//! point carries `placeholder: true`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use hlnd_common::{map_points, MapPoint, MapRegion};
use serde::Serialize;

use super::filtered;
use crate::{error::ApiResult, request::FilterRequest, AppState};

#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub region: MapRegion,
    pub points: Vec<MapPoint>,
}

/// POST /api/map
pub async fn get_map_points(
    State(state): State<AppState>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<MapResponse>> {
    let Json(request) = body?;
    let subset = filtered(&state, &request)?;
    let region = state.settings.map_region;

    let points = map_points(&subset, &region, &mut rand::thread_rng());

    Ok(Json(MapResponse { region, points }))
}
