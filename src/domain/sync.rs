//! Device sync domain types
//!
//! A small instruction queue used to pass work items between the operator's
//! devices (phone → desktop). Ordered by priority, then recency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sync message entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SyncMessage {
    pub id: i64,
    pub content: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub message_type: String,
    pub device_from: String,
    pub priority: i32,
    pub images: Option<sqlx::types::Json<Vec<String>>>,
    pub status: String,
    pub reply: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSyncMessageRequest {
    pub content: String,
    #[serde(rename = "type", default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub device_from: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateSyncMessageRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SyncFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub device_from: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncStatsResponse {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub total: i64,
}
