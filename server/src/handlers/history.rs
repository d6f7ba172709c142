//! Scan history handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::middleware::auth::UserContext;
use crate::models::{ScanRecord, ScanStats, ScanSummary};
use crate::{AppError, AppResult, AppState};

/// Most recent scans per listing
const HISTORY_LIMIT: i64 = 50;

/// List the caller's scans, newest first
pub async fn list(
    State(state): State<AppState>,
    user: UserContext,
) -> AppResult<Json<Vec<ScanSummary>>> {
    let scans = ScanRecord::list_by_user(&state.pool, user.user_id, HISTORY_LIMIT).await?;
    Ok(Json(scans.iter().map(ScanRecord::to_summary).collect()))
}

/// Aggregate counts for the caller
pub async fn stats(
    State(state): State<AppState>,
    user: UserContext,
) -> AppResult<Json<ScanStats>> {
    let stats = ScanRecord::stats_for_user(&state.pool, user.user_id).await?;
    Ok(Json(stats))
}

/// Delete one of the caller's scans
pub async fn delete(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = ScanRecord::delete_for_user(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Scan not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}
