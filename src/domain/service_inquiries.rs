//! Service inquiry domain types
//!
//! Service inquiries come from the public lead funnel: a region, a service
//! category, optional vehicle details, and optionally a targeted shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Display labels for the internal service codes, used in share messages
/// and notifications. Unknown codes fall through as-is.
pub const SERVICE_TYPE_LABELS: &[(&str, &str)] = &[
    ("TIRE", "🛞 타이어"),
    ("OIL", "🛢️ 엔진오일"),
    ("BRAKE", "🔴 브레이크"),
    ("MAINTENANCE", "🔧 경정비"),
    ("CONSULT", "💬 종합상담"),
];

pub fn service_type_label(code: &str) -> String {
    SERVICE_TYPE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Service inquiry entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ServiceInquiry {
    pub id: i64,
    pub name: Option<String>,
    pub region_sido: String,
    pub region_sigungu: String,
    pub region_dong: Option<String>,
    pub service_type: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_model: Option<String>,
    pub customer_id: Option<i64>,
    pub mechanic_id: Option<i64>,
    pub status: String,
    pub shared_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public funnel submission body
#[derive(Debug, Deserialize)]
pub struct CreateServiceInquiryRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub region_sido: String,
    pub region_sigungu: String,
    #[serde(default)]
    pub region_dong: Option<String>,
    pub service_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub mechanic_id: Option<i64>,
}

/// Public counter shown on the landing page
#[derive(Debug, Serialize)]
pub struct ServiceInquiryStats {
    pub recent_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_service_codes_map_to_labels() {
        assert_eq!(service_type_label("TIRE"), "🛞 타이어");
        assert_eq!(service_type_label("CONSULT"), "💬 종합상담");
    }

    #[test]
    fn unknown_service_codes_pass_through() {
        assert_eq!(service_type_label("DETAILING"), "DETAILING");
    }
}
