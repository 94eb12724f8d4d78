//! Quote request routes
//!
//! Customers request estimates from a specific shop; admins triage them and
//! owners can list requests targeting their own shops.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::{RequireAdmin, RequireAuth};
use crate::domain::quote_requests::{
    CreateQuoteRequestRequest, QuoteRequest, QuoteRequestWithMechanic,
};
use crate::domain::unified::UpdateUnifiedStatusRequest;
use crate::error::ApiError;

const QUOTE_COLUMNS: &str = "id, mechanic_id, customer_name, customer_phone, car_model, \
     car_year, description, images, status, created_at";

#[derive(Debug, Deserialize, Default)]
pub struct QuoteRequestFilter {
    #[serde(default)]
    pub status: Option<String>,
}

/// POST /quote-requests - public, targets an existing shop
pub async fn create_quote_request(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateQuoteRequestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.customer_name.trim().is_empty() || req.customer_phone.trim().is_empty() {
        return Err(ApiError::bad_request("customer name and phone are required"));
    }

    let mechanic_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM mechanics WHERE id = $1 AND is_active = TRUE)",
    )
    .bind(req.mechanic_id)
    .fetch_one(&state.db)
    .await?;

    if !mechanic_exists {
        return Err(ApiError::not_found("Mechanic not found"));
    }

    let quote = sqlx::query_as::<_, QuoteRequest>(&format!(
        "INSERT INTO quote_requests \
         (mechanic_id, customer_name, customer_phone, car_model, car_year, description, images) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {QUOTE_COLUMNS}"
    ))
    .bind(req.mechanic_id)
    .bind(&req.customer_name)
    .bind(&req.customer_phone)
    .bind(&req.car_model)
    .bind(&req.car_year)
    .bind(&req.description)
    .bind(sqlx::types::Json(req.images.unwrap_or_default()))
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        quote_id = quote.id,
        mechanic_id = quote.mechanic_id,
        "Quote request submitted"
    );

    Ok(Created(DataResponse::new(quote)))
}

/// GET /quote-requests - admin list with status filter
pub async fn list_quote_requests(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<QuoteRequestFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM quote_requests WHERE ($1::text IS NULL OR status = $1)",
    )
    .bind(&filter.status)
    .fetch_one(&state.db)
    .await?;

    let quotes = sqlx::query_as::<_, QuoteRequestWithMechanic>(
        "SELECT q.id, q.mechanic_id, m.name AS mechanic_name, q.customer_name, \
                q.customer_phone, q.car_model, q.car_year, q.description, q.images, \
                q.status, q.created_at \
         FROM quote_requests q \
         LEFT JOIN mechanics m ON m.id = q.mechanic_id \
         WHERE ($1::text IS NULL OR q.status = $1) \
         ORDER BY q.created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(&filter.status)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(quotes, &pagination, total as u64))
}

/// GET /quote-requests/mechanic/:id - admin, or the shop's own owner
pub async fn list_by_mechanic(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(mechanic_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !auth.is_admin() {
        let owns: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM mechanics WHERE id = $1 AND owner_id = $2)",
        )
        .bind(mechanic_id)
        .bind(auth.account_id)
        .fetch_one(&state.db)
        .await?;

        if !owns {
            return Err(ApiError::forbidden("Not your shop"));
        }
    }

    let quotes = sqlx::query_as::<_, QuoteRequest>(&format!(
        "SELECT {QUOTE_COLUMNS} FROM quote_requests \
         WHERE mechanic_id = $1 ORDER BY created_at DESC"
    ))
    .bind(mechanic_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DataResponse::new(quotes)))
}

/// PATCH /quote-requests/:id/status - admin
pub async fn update_status(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUnifiedStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = sqlx::query_as::<_, QuoteRequest>(&format!(
        "UPDATE quote_requests SET status = $2 WHERE id = $1 RETURNING {QUOTE_COLUMNS}"
    ))
    .bind(id)
    .bind(req.status.to_string())
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Quote request not found"))?;

    Ok(Json(DataResponse::new(quote)))
}

/// DELETE /quote-requests/:id - admin hard delete
pub async fn delete_quote_request(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM quote_requests WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Quote request not found"));
    }

    Ok(NoContent)
}
