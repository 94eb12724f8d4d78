//! General inquiry routes
//!
//! Public contact-form submission plus admin triage (list, detail with
//! auto-mark-read, reply, delete).

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAdmin;
use crate::domain::inquiries::{
    CreateInquiryRequest, Inquiry, InquiryFilter, ReplyRequest, UnreadCountResponse,
};
use crate::error::ApiError;

const INQUIRY_COLUMNS: &str =
    "id, type, name, phone, business_name, content, is_read, reply, replied_at, created_at";

/// POST /inquiries - public contact form
pub async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateInquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() || req.phone.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::bad_request("name, phone and content are required"));
    }

    let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
        "INSERT INTO inquiries (type, name, phone, business_name, content) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {INQUIRY_COLUMNS}"
    ))
    .bind(req.inquiry_type.to_string())
    .bind(&req.name)
    .bind(&req.phone)
    .bind(&req.business_name)
    .bind(&req.content)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        inquiry_id = inquiry.id,
        inquiry_type = %inquiry.inquiry_type,
        "General inquiry submitted"
    );

    Ok(Created(DataResponse::new(inquiry)))
}

/// GET /inquiries - admin list with type/is_read filters
pub async fn list_inquiries(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<InquiryFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry_type = filter.inquiry_type.map(|t| t.to_string());

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM inquiries \
         WHERE ($1::text IS NULL OR type = $1) AND ($2::bool IS NULL OR is_read = $2)",
    )
    .bind(&inquiry_type)
    .bind(filter.is_read)
    .fetch_one(&state.db)
    .await?;

    let inquiries = sqlx::query_as::<_, Inquiry>(&format!(
        "SELECT {INQUIRY_COLUMNS} FROM inquiries \
         WHERE ($1::text IS NULL OR type = $1) AND ($2::bool IS NULL OR is_read = $2) \
         ORDER BY created_at DESC LIMIT $3 OFFSET $4"
    ))
    .bind(&inquiry_type)
    .bind(filter.is_read)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(inquiries, &pagination, total as u64))
}

/// GET /inquiries/unread-count - admin badge counts
pub async fn unread_count(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    #[derive(sqlx::FromRow)]
    struct CountRow {
        customer: i64,
        mechanic: i64,
        total: i64,
    }

    let counts = sqlx::query_as::<_, CountRow>(
        "SELECT COUNT(*) FILTER (WHERE type = 'CUSTOMER') AS customer, \
                COUNT(*) FILTER (WHERE type = 'MECHANIC') AS mechanic, \
                COUNT(*) AS total \
         FROM inquiries WHERE is_read = FALSE",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(UnreadCountResponse {
        customer: counts.customer,
        mechanic: counts.mechanic,
        total: counts.total,
    }))
}

/// GET /inquiries/:id - admin detail, marks the inquiry read on view
pub async fn get_inquiry(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
        "UPDATE inquiries SET is_read = TRUE WHERE id = $1 RETURNING {INQUIRY_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

    Ok(Json(DataResponse::new(inquiry)))
}

/// PATCH /inquiries/:id/reply - admin reply, marks read and stamps replied_at
pub async fn reply_inquiry(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<ReplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.reply.trim().is_empty() {
        return Err(ApiError::bad_request("reply must not be empty"));
    }

    let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
        "UPDATE inquiries SET reply = $2, replied_at = NOW(), is_read = TRUE \
         WHERE id = $1 RETURNING {INQUIRY_COLUMNS}"
    ))
    .bind(id)
    .bind(&req.reply)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

    Ok(Json(DataResponse::new(inquiry)))
}

/// DELETE /inquiries/:id - admin hard delete
pub async fn delete_inquiry(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Inquiry not found"));
    }

    Ok(NoContent)
}
