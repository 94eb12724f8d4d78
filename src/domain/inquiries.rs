//! General inquiry domain types
//!
//! General inquiries come from the public contact form and are triaged by
//! admins. They track lifecycle through `is_read`/`reply` rather than a
//! status column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Who submitted the inquiry form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryType {
    #[default]
    Customer,
    Mechanic,
}

impl From<String> for InquiryType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "MECHANIC" => Self::Mechanic,
            _ => Self::Customer,
        }
    }
}

impl std::fmt::Display for InquiryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "CUSTOMER"),
            Self::Mechanic => write!(f, "MECHANIC"),
        }
    }
}

/// General inquiry entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Inquiry {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub inquiry_type: String,
    pub name: String,
    pub phone: String,
    pub business_name: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public submission body
#[derive(Debug, Deserialize)]
pub struct CreateInquiryRequest {
    #[serde(rename = "type", default)]
    pub inquiry_type: InquiryType,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub business_name: Option<String>,
    pub content: String,
}

/// Admin reply body
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}

/// Admin list filters
#[derive(Debug, Deserialize, Default)]
pub struct InquiryFilter {
    #[serde(rename = "type")]
    pub inquiry_type: Option<InquiryType>,
    pub is_read: Option<bool>,
}

/// Unread counts split by submitter type
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub customer: i64,
    pub mechanic: i64,
    pub total: i64,
}
