use axum::{extract::State, Json};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::models::SetListing;
use crate::services::list_sets;

/// 系列列表
pub async fn get_sets(State(state): State<AppState>) -> ApiResult<Json<SetListing>> {
    let listing = list_sets(state.source.as_ref())
        .await
        .map_err(|e| ApiError::upstream(e, state.config.upstream_error_status))?;

    tracing::debug!("Fetched {} sets from upstream", listing.sets.len());
    Ok(Json(listing))
}
