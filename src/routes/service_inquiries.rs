//! Service inquiry routes
//!
//! Public lead funnel: region + service category + optional vehicle info.
//! New leads trigger a fire-and-forget Telegram notification.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{Created, DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAdmin;
use crate::domain::service_inquiries::{
    service_type_label, CreateServiceInquiryRequest, ServiceInquiry, ServiceInquiryStats,
};
use crate::domain::unified::UpdateUnifiedStatusRequest;
use crate::error::ApiError;

const SERVICE_INQUIRY_COLUMNS: &str = "id, name, region_sido, region_sigungu, region_dong, \
     service_type, description, phone, vehicle_number, vehicle_model, customer_id, mechanic_id, \
     status, shared_at, created_at";

#[derive(Debug, Deserialize, Default)]
pub struct ServiceInquiryFilter {
    #[serde(default)]
    pub status: Option<String>,
}

/// Telegram text for a new lead. The phone stays out of the notification.
fn new_lead_message(inquiry: &ServiceInquiry) -> String {
    let mut msg = String::from("🔔 새로운 서비스 신청!\n\n");
    msg.push_str(&format!(
        "📍 {} {}\n",
        inquiry.region_sido, inquiry.region_sigungu
    ));
    msg.push_str(&format!("🔧 {}\n", service_type_label(&inquiry.service_type)));
    if let Some(desc) = &inquiry.description {
        msg.push_str(&format!("📝 {}\n", desc));
    }
    if let Some(model) = &inquiry.vehicle_model {
        msg.push_str(&format!("🚗 {}\n", model));
    }
    msg
}

/// POST /service-inquiries - public funnel submission
pub async fn create_service_inquiry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateServiceInquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.region_sido.trim().is_empty() || req.region_sigungu.trim().is_empty() {
        return Err(ApiError::bad_request("region is required"));
    }
    if req.service_type.trim().is_empty() {
        return Err(ApiError::bad_request("service_type is required"));
    }

    let inquiry = sqlx::query_as::<_, ServiceInquiry>(&format!(
        "INSERT INTO service_inquiries \
         (name, region_sido, region_sigungu, region_dong, service_type, description, phone, \
          vehicle_number, vehicle_model, mechanic_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {SERVICE_INQUIRY_COLUMNS}"
    ))
    .bind(&req.name)
    .bind(&req.region_sido)
    .bind(&req.region_sigungu)
    .bind(&req.region_dong)
    .bind(&req.service_type)
    .bind(&req.description)
    .bind(&req.phone)
    .bind(&req.vehicle_number)
    .bind(&req.vehicle_model)
    .bind(req.mechanic_id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        inquiry_id = inquiry.id,
        service_type = %inquiry.service_type,
        "Service inquiry submitted"
    );

    // Notification failure never fails the submission
    if let Some(telegram) = state.telegram.clone() {
        let text = new_lead_message(&inquiry);
        tokio::spawn(async move {
            if let Err(e) = telegram.send_message(&text).await {
                tracing::warn!(error = %e, "Telegram lead notification failed");
            }
        });
    }

    Ok(Created(DataResponse::new(inquiry)))
}

/// GET /service-inquiries - admin list with status filter
pub async fn list_service_inquiries(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ServiceInquiryFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM service_inquiries WHERE ($1::text IS NULL OR status = $1)",
    )
    .bind(&filter.status)
    .fetch_one(&state.db)
    .await?;

    let inquiries = sqlx::query_as::<_, ServiceInquiry>(&format!(
        "SELECT {SERVICE_INQUIRY_COLUMNS} FROM service_inquiries \
         WHERE ($1::text IS NULL OR status = $1) \
         ORDER BY created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(&filter.status)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(inquiries, &pagination, total as u64))
}

/// GET /service-inquiries/stats - public recent-lead counter
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let recent_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM service_inquiries WHERE created_at > NOW() - INTERVAL '7 days'",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ServiceInquiryStats { recent_count }))
}

/// GET /service-inquiries/:id - admin detail
pub async fn get_service_inquiry(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = sqlx::query_as::<_, ServiceInquiry>(&format!(
        "SELECT {SERVICE_INQUIRY_COLUMNS} FROM service_inquiries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Service inquiry not found"))?;

    Ok(Json(DataResponse::new(inquiry)))
}

/// PATCH /service-inquiries/:id/status - admin; SHARED stamps shared_at
pub async fn update_status(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUnifiedStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = sqlx::query_as::<_, ServiceInquiry>(&format!(
        "UPDATE service_inquiries \
         SET status = $2, \
             shared_at = CASE WHEN $2 = 'SHARED' THEN NOW() ELSE shared_at END \
         WHERE id = $1 RETURNING {SERVICE_INQUIRY_COLUMNS}"
    ))
    .bind(id)
    .bind(req.status.to_string())
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Service inquiry not found"))?;

    Ok(Json(DataResponse::new(inquiry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn inquiry() -> ServiceInquiry {
        ServiceInquiry {
            id: 1,
            name: None,
            region_sido: "서울특별시".into(),
            region_sigungu: "강남구".into(),
            region_dong: None,
            service_type: "OIL".into(),
            description: Some("오일 교체 희망".into()),
            phone: Some("010-1111-2222".into()),
            vehicle_number: None,
            vehicle_model: Some("그랜저".into()),
            customer_id: None,
            mechanic_id: None,
            status: "PENDING".into(),
            shared_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lead_message_includes_region_and_label() {
        let msg = new_lead_message(&inquiry());
        assert!(msg.contains("📍 서울특별시 강남구"));
        assert!(msg.contains("🛢️ 엔진오일"));
        assert!(msg.contains("🚗 그랜저"));
    }

    #[test]
    fn lead_message_never_contains_the_phone() {
        let msg = new_lead_message(&inquiry());
        assert!(!msg.contains("010-1111-2222"));
    }
}
