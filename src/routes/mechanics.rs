//! Mechanic directory routes
//!
//! Public search/detail over active shops; admin CRUD. New shops append at
//! the end of the manual sort order.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAdmin;
use crate::domain::mechanics::{
    CreateMechanicRequest, Mechanic, MechanicFilter, MechanicResponse, UpdateMechanicRequest,
};
use crate::domain::reviews::PublicReview;
use crate::error::{ApiError, ApiResult};

pub(crate) const MECHANIC_COLUMNS: &str = "id, owner_id, name, address, location, phone, \
     description, map_lat, map_lng, gallery_images, specialties, payment_methods, \
     operating_hours, holidays, sort_order, is_active, created_at, updated_at";

const DIRECTORY_FILTER: &str = "is_active = TRUE \
     AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR address ILIKE '%' || $1 || '%') \
     AND ($2::text IS NULL OR location ILIKE '%' || $2 || '%') \
     AND ($3::text IS NULL OR specialties ? $3) \
     AND ($4::text IS NULL OR address ILIKE '%' || $4 || '%') \
     AND ($5::text IS NULL OR address ILIKE '%' || $5 || '%')";

/// GET /mechanics - public directory search
pub async fn list_mechanics(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MechanicFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let total: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM mechanics WHERE {DIRECTORY_FILTER}"))
            .bind(&filter.search)
            .bind(&filter.location)
            .bind(&filter.specialty)
            .bind(&filter.sido)
            .bind(&filter.sigungu)
            .fetch_one(&state.db)
            .await?;

    let mechanics = sqlx::query_as::<_, Mechanic>(&format!(
        "SELECT {MECHANIC_COLUMNS} FROM mechanics WHERE {DIRECTORY_FILTER} \
         ORDER BY sort_order ASC, created_at DESC LIMIT $6 OFFSET $7"
    ))
    .bind(&filter.search)
    .bind(&filter.location)
    .bind(&filter.specialty)
    .bind(&filter.sido)
    .bind(&filter.sigungu)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    let data: Vec<MechanicResponse> = mechanics.into_iter().map(Into::into).collect();
    Ok(Paginated::new(data, &pagination, total as u64))
}

#[derive(Serialize)]
struct MechanicDetail {
    #[serde(flatten)]
    mechanic: MechanicResponse,
    reviews: Vec<PublicReview>,
}

/// GET /mechanics/:id - public detail with approved reviews
pub async fn get_mechanic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
        "SELECT {MECHANIC_COLUMNS} FROM mechanics WHERE id = $1 AND is_active = TRUE"
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Mechanic not found"))?;

    let reviews = sqlx::query_as::<_, PublicReview>(
        "SELECT id, nickname, content, rating, created_at FROM reviews \
         WHERE mechanic_id = $1 AND is_approved = TRUE AND is_active = TRUE \
         ORDER BY created_at DESC LIMIT 10",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DataResponse::new(MechanicDetail {
        mechanic: mechanic.into(),
        reviews,
    })))
}

/// POST /mechanics - admin create, appended at the end of the sort order
pub async fn create_mechanic(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMechanicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mechanic = insert_mechanic(&state, None, &req).await?;

    tracing::info!(mechanic_id = mechanic.id, name = %mechanic.name, "Mechanic created");

    Ok(Created(DataResponse::new(MechanicResponse::from(mechanic))))
}

/// Shared insert used by the admin route and the owner self-service route
pub(crate) async fn insert_mechanic(
    state: &AppState,
    owner_id: Option<i64>,
    req: &CreateMechanicRequest,
) -> ApiResult<Mechanic> {
    if req.name.trim().is_empty() || req.address.trim().is_empty() {
        return Err(ApiError::bad_request("name and address are required"));
    }

    let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
        "INSERT INTO mechanics \
         (owner_id, name, address, location, phone, description, map_lat, map_lng, \
          gallery_images, specialties, payment_methods, operating_hours, holidays, sort_order) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM mechanics)) \
         RETURNING {MECHANIC_COLUMNS}"
    ))
    .bind(owner_id)
    .bind(&req.name)
    .bind(&req.address)
    .bind(&req.location)
    .bind(&req.phone)
    .bind(&req.description)
    .bind(req.map_lat)
    .bind(req.map_lng)
    .bind(sqlx::types::Json(req.gallery_images.clone().unwrap_or_default()))
    .bind(sqlx::types::Json(req.specialties.clone().unwrap_or_default()))
    .bind(sqlx::types::Json(req.payment_methods.clone().unwrap_or_default()))
    .bind(req.operating_hours.clone().map(sqlx::types::Json))
    .bind(req.holidays.clone().map(sqlx::types::Json))
    .fetch_one(&state.db)
    .await?;

    Ok(mechanic)
}

/// Shared partial update; `owner_id` scopes the row for owner self-service
pub(crate) async fn patch_mechanic(
    state: &AppState,
    id: i64,
    owner_id: Option<i64>,
    req: &UpdateMechanicRequest,
) -> ApiResult<Mechanic> {
    let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
        "UPDATE mechanics SET \
             name = COALESCE($3, name), \
             address = COALESCE($4, address), \
             location = COALESCE($5, location), \
             phone = COALESCE($6, phone), \
             description = COALESCE($7, description), \
             map_lat = COALESCE($8, map_lat), \
             map_lng = COALESCE($9, map_lng), \
             gallery_images = COALESCE($10, gallery_images), \
             specialties = COALESCE($11, specialties), \
             payment_methods = COALESCE($12, payment_methods), \
             operating_hours = COALESCE($13, operating_hours), \
             holidays = COALESCE($14, holidays), \
             sort_order = COALESCE($15, sort_order), \
             updated_at = NOW() \
         WHERE id = $1 AND ($2::bigint IS NULL OR owner_id = $2) \
         RETURNING {MECHANIC_COLUMNS}"
    ))
    .bind(id)
    .bind(owner_id)
    .bind(&req.name)
    .bind(&req.address)
    .bind(&req.location)
    .bind(&req.phone)
    .bind(&req.description)
    .bind(req.map_lat)
    .bind(req.map_lng)
    .bind(req.gallery_images.clone().map(sqlx::types::Json))
    .bind(req.specialties.clone().map(sqlx::types::Json))
    .bind(req.payment_methods.clone().map(sqlx::types::Json))
    .bind(req.operating_hours.clone().map(sqlx::types::Json))
    .bind(req.holidays.clone().map(sqlx::types::Json))
    .bind(req.sort_order)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Mechanic not found"))?;

    Ok(mechanic)
}

/// PUT /mechanics/:id - admin partial update
pub async fn update_mechanic(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMechanicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mechanic = patch_mechanic(&state, id, None, &req).await?;
    Ok(Json(DataResponse::new(MechanicResponse::from(mechanic))))
}

/// DELETE /mechanics/:id - admin soft delete
pub async fn delete_mechanic(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result =
        sqlx::query("UPDATE mechanics SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&state.db)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Mechanic not found"));
    }

    Ok(NoContent)
}
