//! Shop owner domain types
//!
//! Owners are mechanic-shop operator accounts. They start PENDING and need
//! admin approval before gaining full write access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Approval status for owners
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl From<String> for OwnerStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "APPROVED" => Self::Approved,
            "REJECTED" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Owner entity as exposed to admins
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Owner {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub business_license_url: Option<String>,
    pub business_name: Option<String>,
    pub mechanic_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Admin list filter
#[derive(Debug, Deserialize, Default)]
pub struct OwnerFilter {
    #[serde(default)]
    pub status: Option<OwnerStatus>,
}

/// Rejection body
#[derive(Debug, Deserialize, Default)]
pub struct RejectOwnerRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Reapplication body (owner resubmits the business license)
#[derive(Debug, Deserialize)]
pub struct ReapplyRequest {
    pub business_license_url: String,
    pub business_name: String,
}
