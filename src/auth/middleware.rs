//! Auth extractors
//!
//! Tokens arrive in an HttpOnly cookie (`admin_token` / `owner_token`) with
//! an `Authorization: Bearer` header fallback for API clients.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use std::sync::Arc;

use super::{AuthContext, Role};
use crate::app::AppState;
use crate::error::ErrorResponse;

pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";
pub const OWNER_TOKEN_COOKIE: &str = "owner_token";

/// Extractor that requires a valid session token
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl std::ops::Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extractor that requires a valid session token with the admin role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

impl std::ops::Deref for RequireAdmin {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extractor that decodes a token when present but never rejects.
///
/// Used by public endpoints whose response shape depends on the caller's
/// role (phone redaction on shared inquiry links).
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthContext>);

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Missing authorization token",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid or expired token",
            ),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Insufficient permissions",
            ),
        };

        let body = ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Pull the raw token out of the request: cookies first, then bearer header
fn extract_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar
        .get(ADMIN_TOKEN_COOKIE)
        .or_else(|| jar.get(OWNER_TOKEN_COOKIE))
    {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or(AuthError::MissingToken)?;

        let claims = state.token_signer.verify(&token).map_err(|e| {
            tracing::warn!(error = %e, "Token verification failed");
            AuthError::InvalidToken
        })?;

        Ok(RequireAuth(AuthContext::from_claims(&claims)))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(context) = RequireAuth::from_request_parts(parts, state).await?;

        if context.role != Role::Admin {
            return Err(AuthError::Forbidden);
        }

        Ok(RequireAdmin(context))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let context = extract_token(parts)
            .and_then(|token| state.token_signer.verify(&token).ok())
            .map(|claims| AuthContext::from_claims(&claims));

        Ok(OptionalAuth(context))
    }
}
