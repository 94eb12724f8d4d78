//! Review routes
//!
//! Reviews are submitted publicly and stay hidden until an admin approves
//! them. Rejection soft-deletes the row.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAdmin;
use crate::domain::reviews::{
    CreateReviewRequest, PublicReview, Review, ReviewFilter, ReviewWithMechanic,
};
use crate::error::ApiError;

const REVIEW_COLUMNS: &str =
    "id, mechanic_id, nickname, content, rating, is_approved, is_active, created_at";

/// POST /reviews - public, lands unapproved
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !(1..=5).contains(&req.rating) {
        return Err(ApiError::bad_request("rating must be between 1 and 5"));
    }
    if req.nickname.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::bad_request("nickname and content are required"));
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

    let review = sqlx::query_as::<_, Review>(&format!(
        "INSERT INTO reviews (mechanic_id, nickname, content, rating) \
         VALUES ($1, $2, $3, $4) RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(req.mechanic_id)
    .bind(&req.nickname)
    .bind(&req.content)
    .bind(req.rating)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(review_id = review.id, mechanic_id = review.mechanic_id, "Review submitted");

    Ok(Created(DataResponse::new(review)))
}

/// GET /reviews/mechanic/:id - public, approved reviews only (latest 10)
pub async fn list_for_mechanic(
    State(state): State<Arc<AppState>>,
    Path(mechanic_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = sqlx::query_as::<_, PublicReview>(
        "SELECT id, nickname, content, rating, created_at FROM reviews \
         WHERE mechanic_id = $1 AND is_approved = TRUE AND is_active = TRUE \
         ORDER BY created_at DESC LIMIT 10",
    )
    .bind(mechanic_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DataResponse::new(reviews)))
}

/// GET /reviews - admin list with the shop name joined in
pub async fn list_reviews(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ReviewFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reviews \
         WHERE is_active = TRUE AND ($1::bool IS NULL OR is_approved = $1)",
    )
    .bind(filter.approved)
    .fetch_one(&state.db)
    .await?;

    let reviews = sqlx::query_as::<_, ReviewWithMechanic>(
        "SELECT r.id, r.mechanic_id, m.name AS mechanic_name, r.nickname, r.content, \
                r.rating, r.is_approved, r.is_active, r.created_at \
         FROM reviews r \
         LEFT JOIN mechanics m ON m.id = r.mechanic_id \
         WHERE r.is_active = TRUE AND ($1::bool IS NULL OR r.is_approved = $1) \
         ORDER BY r.created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(filter.approved)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(reviews, &pagination, total as u64))
}

/// GET /reviews/pending-count - admin badge
pub async fn pending_count(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let pending: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reviews WHERE is_approved = FALSE AND is_active = TRUE",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(serde_json::json!({ "pending": pending })))
}

/// PATCH /reviews/:id/approve - admin
pub async fn approve_review(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        "UPDATE reviews SET is_approved = TRUE WHERE id = $1 AND is_active = TRUE \
         RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(DataResponse::new(review)))
}

/// PATCH /reviews/:id/reject - admin, hides the review
pub async fn reject_review(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result =
        sqlx::query("UPDATE reviews SET is_approved = FALSE, is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&state.db)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Review not found"));
    }

    Ok(Json(crate::api::MessageResponse::new("Review rejected")))
}

/// DELETE /reviews/:id - admin hard delete
pub async fn delete_review(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Review not found"));
    }

    Ok(NoContent)
}
