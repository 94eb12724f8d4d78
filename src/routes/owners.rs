//! Owner account routes
//!
//! Admin approval workflow (list, approve, reject) plus owner self-service:
//! reapplying after rejection and managing the owner's own shops, which is
//! gated on APPROVED status.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{Created, DataResponse, MessageResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::{AuthContext, RequireAdmin, RequireAuth, Role};
use crate::domain::mechanics::{
    CreateMechanicRequest, Mechanic, MechanicResponse, UpdateMechanicRequest,
};
use crate::domain::owners::{Owner, OwnerFilter, ReapplyRequest, RejectOwnerRequest};
use crate::error::{ApiError, ApiResult};

use super::mechanics::{insert_mechanic, patch_mechanic, MECHANIC_COLUMNS};

const OWNER_SELECT: &str = "SELECT o.id, o.email, o.name, o.phone, o.status, \
     o.rejection_reason, o.business_license_url, o.business_name, \
     COUNT(m.id) AS mechanic_count, o.created_at \
     FROM owners o LEFT JOIN mechanics m ON m.owner_id = o.id";

async fn fetch_owner(state: &AppState, id: i64) -> ApiResult<Owner> {
    sqlx::query_as::<_, Owner>(&format!("{OWNER_SELECT} WHERE o.id = $1 GROUP BY o.id"))
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Owner not found"))
}

/// Owner self-service requires an owner-role token and APPROVED status
async fn require_approved_owner(state: &AppState, auth: &AuthContext) -> ApiResult<()> {
    if auth.role != Role::Owner {
        return Err(ApiError::forbidden("Owner account required"));
    }

    let status: Option<String> = sqlx::query_scalar("SELECT status FROM owners WHERE id = $1")
        .bind(auth.account_id)
        .fetch_optional(&state.db)
        .await?;

    match status.as_deref() {
        Some("APPROVED") => Ok(()),
        Some(_) => Err(ApiError::forbidden("Account not approved yet")),
        None => Err(ApiError::unauthorized("Account no longer exists")),
    }
}

/// GET /owners - admin list with status filter
pub async fn list_owners(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<OwnerFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let status = filter.status.map(|s| s.to_string());

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM owners WHERE ($1::text IS NULL OR status = $1)")
            .bind(&status)
            .fetch_one(&state.db)
            .await?;

    let owners = sqlx::query_as::<_, Owner>(&format!(
        "{OWNER_SELECT} WHERE ($1::text IS NULL OR o.status = $1) \
         GROUP BY o.id ORDER BY o.created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(&status)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(owners, &pagination, total as u64))
}

/// GET /owners/:id - admin detail
pub async fn get_owner(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = fetch_owner(&state, id).await?;
    Ok(Json(DataResponse::new(owner)))
}

/// PATCH /owners/:id/approve - admin
pub async fn approve_owner(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query(
        "UPDATE owners SET status = 'APPROVED', rejection_reason = NULL WHERE id = $1",
    )
    .bind(id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Owner not found"));
    }

    tracing::info!(owner_id = id, "Owner approved");

    let owner = fetch_owner(&state, id).await?;
    Ok(Json(DataResponse::new(owner)))
}

/// PATCH /owners/:id/reject - admin, with an optional reason
pub async fn reject_owner(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<RejectOwnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result =
        sqlx::query("UPDATE owners SET status = 'REJECTED', rejection_reason = $2 WHERE id = $1")
            .bind(id)
            .bind(&req.reason)
            .execute(&state.db)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Owner not found"));
    }

    tracing::info!(owner_id = id, "Owner rejected");

    let owner = fetch_owner(&state, id).await?;
    Ok(Json(DataResponse::new(owner)))
}

/// POST /owners/me/reapply - rejected owners resubmit their license
pub async fn reapply(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReapplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if auth.role != Role::Owner {
        return Err(ApiError::forbidden("Owner account required"));
    }

    let status: Option<String> = sqlx::query_scalar("SELECT status FROM owners WHERE id = $1")
        .bind(auth.account_id)
        .fetch_optional(&state.db)
        .await?;

    match status.as_deref() {
        None => return Err(ApiError::unauthorized("Account no longer exists")),
        Some("REJECTED") => {}
        Some(_) => return Err(ApiError::forbidden("Only rejected accounts can reapply")),
    }

    sqlx::query(
        "UPDATE owners \
         SET status = 'PENDING', business_license_url = $2, business_name = $3, \
             rejection_reason = NULL \
         WHERE id = $1",
    )
    .bind(auth.account_id)
    .bind(&req.business_license_url)
    .bind(&req.business_name)
    .execute(&state.db)
    .await?;

    tracing::info!(owner_id = auth.account_id, "Owner reapplied");

    Ok(Json(MessageResponse::new("Application resubmitted")))
}

/// GET /owners/me/mechanics - the caller's own shops
pub async fn list_my_mechanics(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    require_approved_owner(&state, &auth).await?;

    let mechanics = sqlx::query_as::<_, Mechanic>(&format!(
        "SELECT {MECHANIC_COLUMNS} FROM mechanics \
         WHERE owner_id = $1 AND is_active = TRUE ORDER BY sort_order ASC, created_at DESC"
    ))
    .bind(auth.account_id)
    .fetch_all(&state.db)
    .await?;

    let data: Vec<MechanicResponse> = mechanics.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse::new(data)))
}

/// POST /owners/me/mechanics
pub async fn create_my_mechanic(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMechanicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_approved_owner(&state, &auth).await?;

    let mechanic = insert_mechanic(&state, Some(auth.account_id), &req).await?;

    tracing::info!(
        mechanic_id = mechanic.id,
        owner_id = auth.account_id,
        "Owner registered a shop"
    );

    Ok(Created(DataResponse::new(MechanicResponse::from(mechanic))))
}

/// PUT /owners/me/mechanics/:id - update limited to the caller's own rows
pub async fn update_my_mechanic(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMechanicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_approved_owner(&state, &auth).await?;

    let mechanic = patch_mechanic(&state, id, Some(auth.account_id), &req).await?;
    Ok(Json(DataResponse::new(MechanicResponse::from(mechanic))))
}

/// DELETE /owners/me/mechanics/:id - soft delete, own rows only
pub async fn delete_my_mechanic(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    require_approved_owner(&state, &auth).await?;

    let result = sqlx::query(
        "UPDATE mechanics SET is_active = FALSE, updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2",
    )
    .bind(id)
    .bind(auth.account_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Mechanic not found"));
    }

    Ok(NoContent)
}
