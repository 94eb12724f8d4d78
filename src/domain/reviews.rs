//! Review domain types
//!
//! Reviews are submitted publicly and held until an admin approves them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Review entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub mechanic_id: i64,
    pub nickname: String,
    pub content: String,
    pub rating: i32,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Review joined with the shop's name (admin list)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewWithMechanic {
    pub id: i64,
    pub mechanic_id: i64,
    pub mechanic_name: Option<String>,
    pub nickname: String,
    pub content: String,
    pub rating: i32,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public subset shown on the directory detail page
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublicReview {
    pub id: i64,
    pub nickname: String,
    pub content: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// Public submission body
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub mechanic_id: i64,
    pub nickname: String,
    pub content: String,
    pub rating: i32,
}

/// Admin list filter
#[derive(Debug, Deserialize, Default)]
pub struct ReviewFilter {
    #[serde(default)]
    pub approved: Option<bool>,
}
