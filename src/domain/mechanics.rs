//! Mechanic shop domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mechanic shop entity
#[derive(Debug, Clone, FromRow)]
pub struct Mechanic {
    pub id: i64,
    pub owner_id: Option<i64>,
    pub name: String,
    pub address: String,
    pub location: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub map_lat: f64,
    pub map_lng: f64,
    pub gallery_images: sqlx::types::Json<Vec<String>>,
    pub specialties: sqlx::types::Json<Vec<String>>,
    pub payment_methods: sqlx::types::Json<Vec<String>>,
    pub operating_hours: Option<sqlx::types::Json<serde_json::Value>>,
    pub holidays: Option<sqlx::types::Json<serde_json::Value>>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response DTO with JSON wrappers unwrapped
#[derive(Debug, Clone, Serialize)]
pub struct MechanicResponse {
    pub id: i64,
    pub owner_id: Option<i64>,
    pub name: String,
    pub address: String,
    pub location: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub map_lat: f64,
    pub map_lng: f64,
    pub gallery_images: Vec<String>,
    pub specialties: Vec<String>,
    pub payment_methods: Vec<String>,
    pub operating_hours: Option<serde_json::Value>,
    pub holidays: Option<serde_json::Value>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Mechanic> for MechanicResponse {
    fn from(m: Mechanic) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            name: m.name,
            address: m.address,
            location: m.location,
            phone: m.phone,
            description: m.description,
            map_lat: m.map_lat,
            map_lng: m.map_lng,
            gallery_images: m.gallery_images.0,
            specialties: m.specialties.0,
            payment_methods: m.payment_methods.0,
            operating_hours: m.operating_hours.map(|j| j.0),
            holidays: m.holidays.map(|j| j.0),
            sort_order: m.sort_order,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Directory search filters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MechanicFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub sido: Option<String>,
    #[serde(default)]
    pub sigungu: Option<String>,
}

/// Create body (admin, or approved owner via /owners/me/mechanics)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMechanicRequest {
    pub name: String,
    pub address: String,
    pub location: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub map_lat: f64,
    pub map_lng: f64,
    #[serde(default)]
    pub gallery_images: Option<Vec<String>>,
    #[serde(default)]
    pub specialties: Option<Vec<String>>,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
    #[serde(default)]
    pub operating_hours: Option<serde_json::Value>,
    #[serde(default)]
    pub holidays: Option<serde_json::Value>,
}

/// Partial update body
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateMechanicRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub map_lat: Option<f64>,
    #[serde(default)]
    pub map_lng: Option<f64>,
    #[serde(default)]
    pub gallery_images: Option<Vec<String>>,
    #[serde(default)]
    pub specialties: Option<Vec<String>>,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
    #[serde(default)]
    pub operating_hours: Option<serde_json::Value>,
    #[serde(default)]
    pub holidays: Option<serde_json::Value>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}
