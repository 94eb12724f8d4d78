//! Admin session routes
//!
//! Login verifies the password against the stored bcrypt hash and sets an
//! HttpOnly session cookie. The raw token never appears in a response body.

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::auth::middleware::ADMIN_TOKEN_COOKIE;
use crate::auth::{RequireAdmin, Role};
use crate::domain::auth::{AdminInfo, LoginRequest, LoginResponse};
use crate::error::ApiError;

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i64,
    email: String,
    password_hash: String,
    name: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = sqlx::query_as::<_, AdminRow>(
        "SELECT id, email, password_hash, name FROM admins WHERE email = $1",
    )
    .bind(&req.email)
    .fetch_optional(&state.db)
    .await?;

    // Same error for unknown email and bad password
    let admin = admin.ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let valid = bcrypt::verify(&req.password, &admin.password_hash)
        .map_err(|e| ApiError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = state
        .token_signer
        .sign(admin.id, Some(&admin.email), Role::Admin)?;

    let cookie = Cookie::build((ADMIN_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.settings.env.is_prod())
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(state.settings.jwt_ttl_seconds))
        .build();

    tracing::info!(admin_id = admin.id, "Admin logged in");

    let body = LoginResponse {
        admin: AdminInfo {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        },
    };

    Ok((jar.add(cookie), Json(body)))
}

/// GET /auth/profile
pub async fn profile(
    auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = sqlx::query_as::<_, AdminRow>(
        "SELECT id, email, password_hash, name FROM admins WHERE id = $1",
    )
    .bind(auth.account_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(DataResponse::new(AdminInfo {
        id: admin.id,
        email: admin.email,
        name: admin.name,
    })))
}

/// POST /auth/logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(ADMIN_TOKEN_COOKIE).path("/"));
    (jar, Json(serde_json::json!({ "message": "Logged out" })))
}
