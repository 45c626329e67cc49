//! Full dashboard view for one filter

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use hlnd_common::{
    AggregationEngine, AnomalyBreakdown, EntityCategory, Histogram, Metrics, RecordId,
    SampleReader,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::{filtered, ranked_entries, RankedEntry};
use crate::{error::ApiResult, request::FilterRequest, AppState};

/// Reader pick-list entry
#[derive(Debug, Serialize)]
pub struct ReaderSample {
    pub id: RecordId,
    pub text: String,
}

/// Everything the dashboard renders, computed from a single filter scan
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub metrics: Metrics,
    pub top_topics: Vec<RankedEntry>,
    pub anomaly_breakdown: AnomalyBreakdown,
    /// Keyed by category name (`gpe`, `loc`, `org`, `person`)
    pub entities: BTreeMap<&'static str, Vec<RankedEntry>>,
    pub sentiment_histogram: Option<Histogram>,
    pub samples: Vec<ReaderSample>,
}

/// POST /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<DashboardResponse>> {
    let Json(request) = body?;
    let subset = filtered(&state, &request)?;
    let settings = &state.settings;

    let entities = EntityCategory::ALL
        .iter()
        .map(|&category| {
            let table =
                AggregationEngine::entity_frequencies(&subset, category, settings.top_entities);
            (category.as_str(), ranked_entries(table))
        })
        .collect();

    let samples = SampleReader::sample(&subset, settings.sample_size)
        .into_iter()
        .filter_map(|record| {
            record.text().map(|text| ReaderSample {
                id: record.id,
                text: text.to_string(),
            })
        })
        .collect();

    let response = DashboardResponse {
        metrics: AggregationEngine::summarize(&subset),
        top_topics: ranked_entries(AggregationEngine::top_topics(&subset, settings.top_topics)),
        anomaly_breakdown: AggregationEngine::anomaly_breakdown(&subset),
        entities,
        sentiment_histogram: AggregationEngine::sentiment_histogram(
            &subset,
            settings.histogram_bins,
        ),
        samples,
    };

    debug!("Dashboard computed over {} articles", response.metrics.total_count);
    Ok(Json(response))
}
