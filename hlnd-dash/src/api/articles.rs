//! Paginated table of filtered articles

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use hlnd_common::ArticleRecord;
use serde::{Deserialize, Serialize};

use super::filtered;
use crate::{
    error::ApiResult,
    pagination::{calculate_pagination, PAGE_SIZE},
    request::FilterRequest,
    AppState,
};

/// Query parameters for the article table
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// One page of matching articles, in source order
#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub total_results: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub rows: Vec<ArticleRecord>,
}

/// POST /api/articles?page=N
///
/// Out-of-range pages are clamped rather than rejected.
pub async fn list_articles(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<ArticlesResponse>> {
    let Query(query) = query?;
    let Json(request) = body?;
    let subset = filtered(&state, &request)?;
    let p = calculate_pagination(subset.len(), query.page);

    Ok(Json(ArticlesResponse {
        total_results: subset.len(),
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        rows: p.slice(&subset).iter().map(|&r| r.clone()).collect(),
    }))
}
