//! Quote request domain types
//!
//! Quote requests target a specific shop: a customer picks a mechanic from
//! the directory and asks for an estimate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Quote request entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuoteRequest {
    pub id: i64,
    pub mechanic_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub car_model: String,
    pub car_year: Option<String>,
    pub description: Option<String>,
    pub images: sqlx::types::Json<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Quote request joined with the targeted shop's name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuoteRequestWithMechanic {
    pub id: i64,
    pub mechanic_id: i64,
    pub mechanic_name: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub car_model: String,
    pub car_year: Option<String>,
    pub description: Option<String>,
    pub images: sqlx::types::Json<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Public submission body
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequestRequest {
    pub mechanic_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub car_model: String,
    #[serde(default)]
    pub car_year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}
