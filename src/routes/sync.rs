//! Device sync queue routes
//!
//! Admin-only instruction queue between the operator's devices. Ordered by
//! priority, then recency.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAdmin;
use crate::domain::sync::{
    CreateSyncMessageRequest, SyncFilter, SyncMessage, SyncStatsResponse, UpdateSyncMessageRequest,
};
use crate::error::ApiError;

const SYNC_COLUMNS: &str =
    "id, content, type, device_from, priority, images, status, reply, completed_at, created_at";

/// POST /sync
pub async fn create_message(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSyncMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::bad_request("content is required"));
    }

    let message = sqlx::query_as::<_, SyncMessage>(&format!(
        "INSERT INTO sync_messages (content, type, device_from, priority, images) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {SYNC_COLUMNS}"
    ))
    .bind(&req.content)
    .bind(req.message_type.as_deref().unwrap_or("INSTRUCTION"))
    .bind(req.device_from.as_deref().unwrap_or("phone"))
    .bind(req.priority.unwrap_or(0))
    .bind(req.images.clone().map(sqlx::types::Json))
    .fetch_one(&state.db)
    .await?;

    Ok(Created(DataResponse::new(message)))
}

/// GET /sync - status/device filters, priority then recency
pub async fn list_messages(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<SyncFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sync_messages \
         WHERE ($1::text IS NULL OR status = $1) AND ($2::text IS NULL OR device_from = $2)",
    )
    .bind(&filter.status)
    .bind(&filter.device_from)
    .fetch_one(&state.db)
    .await?;

    let messages = sqlx::query_as::<_, SyncMessage>(&format!(
        "SELECT {SYNC_COLUMNS} FROM sync_messages \
         WHERE ($1::text IS NULL OR status = $1) AND ($2::text IS NULL OR device_from = $2) \
         ORDER BY priority DESC, created_at DESC LIMIT $3 OFFSET $4"
    ))
    .bind(&filter.status)
    .bind(&filter.device_from)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(messages, &pagination, total as u64))
}

/// GET /sync/stats
pub async fn stats(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    #[derive(sqlx::FromRow)]
    struct StatsRow {
        pending: i64,
        in_progress: i64,
        completed: i64,
        total: i64,
    }

    let row = sqlx::query_as::<_, StatsRow>(
        "SELECT COUNT(*) FILTER (WHERE status = 'PENDING') AS pending, \
                COUNT(*) FILTER (WHERE status = 'IN_PROGRESS') AS in_progress, \
                COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed, \
                COUNT(*) AS total \
         FROM sync_messages",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(SyncStatsResponse {
        pending: row.pending,
        in_progress: row.in_progress,
        completed: row.completed,
        total: row.total,
    }))
}

/// GET /sync/:id
pub async fn get_message(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let message = sqlx::query_as::<_, SyncMessage>(&format!(
        "SELECT {SYNC_COLUMNS} FROM sync_messages WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Sync message not found"))?;

    Ok(Json(DataResponse::new(message)))
}

/// PATCH /sync/:id - COMPLETED stamps completed_at
pub async fn update_message(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSyncMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = sqlx::query_as::<_, SyncMessage>(&format!(
        "UPDATE sync_messages SET \
             status = COALESCE($2, status), \
             reply = COALESCE($3, reply), \
             priority = COALESCE($4, priority), \
             completed_at = CASE WHEN $2 = 'COMPLETED' THEN NOW() ELSE completed_at END \
         WHERE id = $1 RETURNING {SYNC_COLUMNS}"
    ))
    .bind(id)
    .bind(&req.status)
    .bind(&req.reply)
    .bind(req.priority)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Sync message not found"))?;

    Ok(Json(DataResponse::new(message)))
}

/// DELETE /sync/:id
pub async fn delete_message(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM sync_messages WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Sync message not found"));
    }

    Ok(NoContent)
}
