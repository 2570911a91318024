use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use storeloc_search::{SearchRequest, SearchResponse};

use super::{map_search_error, ApiError, ApiResponse, AppState, ErrorCode, ResponseMeta};
use crate::middleware::RequestId;

/// POST /api/v1/stores/search
pub(super) async fn search_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), ErrorCode::ValidationError, rejection.body_text())
    })?;

    let response = state
        .engine
        .search_request(&request)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SearchResponse::clone(&response),
        meta: ResponseMeta::new(req_id.0),
    }))
}
