use axum::{extract::State, Extension, Json};
use serde::Serialize;
use storeloc_search::EngineCacheStats;

use super::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct ClearCacheData {
    cleared: usize,
}

/// GET /api/v1/cache/stats
pub(super) async fn cache_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<EngineCacheStats>> {
    Json(ApiResponse {
        data: state.engine.cache_stats(),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// POST /api/v1/cache/clear: drop cached search results. Geocodes are kept.
pub(super) async fn clear_cache(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ClearCacheData>> {
    Json(ApiResponse {
        data: ClearCacheData {
            cleared: state.engine.clear_results(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
