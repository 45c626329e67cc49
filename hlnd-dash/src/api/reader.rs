//! Article reader: resolve a pick-list selection to its full record

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use hlnd_common::{ArticleRecord, SampleReader};
use tracing::debug;

use super::filtered;
use crate::{
    error::{ApiError, ApiResult},
    request::ReaderRequest,
    AppState,
};

/// POST /api/reader/article
///
/// Looks the article up inside the filtered subset only. The id is preferred;
/// text falls back to the first exact match.
pub async fn get_reader_article(
    State(state): State<AppState>,
    body: Result<Json<ReaderRequest>, JsonRejection>,
) -> ApiResult<Json<ArticleRecord>> {
    let Json(request) = body?;
    let subset = filtered(&state, &request.filter)?;

    let found = match (request.id, request.text.as_deref()) {
        (Some(id), _) => SampleReader::resolve_by_id(&subset, id)
            .ok_or_else(|| ApiError::NotFound(format!("article {} in current selection", id)))?,
        (None, Some(text)) => SampleReader::resolve(&subset, text)
            .ok_or_else(|| ApiError::NotFound("article text in current selection".to_string()))?,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either id or text must be given".to_string(),
            ))
        }
    };

    debug!("Reader resolved article {}", found.id);
    Ok(Json(found.clone()))
}
