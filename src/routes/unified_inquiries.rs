//! Unified inquiry feed routes
//!
//! The admin triage view over all three contact-request tables. Rows are
//! fetched in parallel, projected into one shape, sorted newest-first and
//! paginated in memory. The public detail endpoint serves share links with
//! role-based phone redaction.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::{DataResponse, MessageResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::{AuthContext, OptionalAuth, RequireAdmin};
use crate::domain::inquiries::Inquiry;
use crate::domain::quote_requests::QuoteRequest;
use crate::domain::service_inquiries::{service_type_label, ServiceInquiry};
use crate::domain::unified::{
    general_derived_status, general_status_patch, project_general_detail, project_quote_detail,
    project_service_detail, project_service_feed, quote_feed_status, share_url, GeneralShareInfo,
    InquiryKind, LeadStatus, QuoteShareInfo, ServiceShareInfo, UnifiedCounts, UnifiedInquiry,
    UpdateUnifiedStatusRequest,
};
use crate::error::{ApiError, ApiResult};

fn parse_kind(raw: &str) -> ApiResult<InquiryKind> {
    InquiryKind::from_str(raw).map_err(ApiError::bad_request)
}

/// Owner accounts only see phones once approved
async fn compute_show_phone(
    state: &AppState,
    context: &Option<AuthContext>,
) -> ApiResult<bool> {
    match context {
        Some(c) if c.is_admin() => Ok(true),
        Some(c) if c.is_owner() => {
            let status: Option<String> =
                sqlx::query_scalar("SELECT status FROM owners WHERE id = $1")
                    .bind(c.account_id)
                    .fetch_optional(&state.db)
                    .await?;
            Ok(matches!(status.as_deref(), Some("APPROVED")))
        }
        _ => Ok(false),
    }
}

/// GET /unified-inquiries - admin feed across all three tables
pub async fn list(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    #[derive(sqlx::FromRow)]
    struct ServiceFeedRow {
        #[sqlx(flatten)]
        inquiry: ServiceInquiry,
        customer_nickname: Option<String>,
        customer_phone: Option<String>,
    }

    #[derive(sqlx::FromRow)]
    struct QuoteFeedRow {
        id: i64,
        customer_name: String,
        customer_phone: String,
        car_model: String,
        description: Option<String>,
        status: String,
        created_at: chrono::DateTime<chrono::Utc>,
        mechanic_name: Option<String>,
    }

    // No filter pushdown: all three tables are fetched whole and merged
    // in memory, so pagination is exact across sources.
    let (generals, services, quotes) = tokio::try_join!(
        sqlx::query_as::<_, Inquiry>(
            "SELECT id, type, name, phone, business_name, content, is_read, reply, \
                    replied_at, created_at \
             FROM inquiries ORDER BY created_at DESC",
        )
        .fetch_all(&state.db),
        sqlx::query_as::<_, ServiceFeedRow>(
            "SELECT s.id, s.name, s.region_sido, s.region_sigungu, s.region_dong, \
                    s.service_type, s.description, s.phone, s.vehicle_number, \
                    s.vehicle_model, s.customer_id, s.mechanic_id, s.status, s.shared_at, \
                    s.created_at, c.nickname AS customer_nickname, \
                    c.phone AS customer_phone \
             FROM service_inquiries s \
             LEFT JOIN customers c ON c.id = s.customer_id \
             ORDER BY s.created_at DESC",
        )
        .fetch_all(&state.db),
        sqlx::query_as::<_, QuoteFeedRow>(
            "SELECT q.id, q.customer_name, q.customer_phone, q.car_model, q.description, \
                    q.status, q.created_at, m.name AS mechanic_name \
             FROM quote_requests q \
             LEFT JOIN mechanics m ON m.id = q.mechanic_id \
             ORDER BY q.created_at DESC",
        )
        .fetch_all(&state.db),
    )?;

    let base = &state.settings.share_base_url;
    let mut entries: Vec<UnifiedInquiry> = Vec::with_capacity(
        generals.len() + services.len() + quotes.len(),
    );

    entries.extend(generals.into_iter().map(|inq| UnifiedInquiry {
        id: inq.id,
        kind: InquiryKind::General,
        name: Some(inq.name),
        phone: Some(inq.phone),
        region_sido: None,
        region_sigungu: None,
        service_type: None,
        description: Some(inq.content),
        status: general_derived_status(inq.is_read, inq.reply.is_some()),
        created_at: inq.created_at,
        share_url: share_url(base, InquiryKind::General, inq.id),
        business_name: inq.business_name,
        car_model: None,
        mechanic_name: None,
    }));

    entries.extend(services.into_iter().map(|row| {
        project_service_feed(row.inquiry, row.customer_nickname, row.customer_phone, base)
    }));

    entries.extend(quotes.into_iter().map(|q| UnifiedInquiry {
        id: q.id,
        kind: InquiryKind::Quote,
        name: Some(q.customer_name),
        phone: Some(q.customer_phone),
        region_sido: None,
        region_sigungu: None,
        service_type: None,
        description: q.description,
        status: quote_feed_status(LeadStatus::from(q.status)),
        created_at: q.created_at,
        share_url: share_url(base, InquiryKind::Quote, q.id),
        business_name: None,
        car_model: Some(q.car_model),
        mechanic_name: q.mechanic_name,
    }));

    let (data, total) =
        crate::domain::unified::sort_and_paginate(entries, pagination.page(), pagination.limit());

    Ok(Paginated::new(data, &pagination, total))
}

/// GET /unified-inquiries/count - pending counts per source
pub async fn counts(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let (inquiries, service_inquiries, quote_requests): (i64, i64, i64) = tokio::try_join!(
        sqlx::query_scalar("SELECT COUNT(*) FROM inquiries WHERE is_read = FALSE")
            .fetch_one(&state.db),
        sqlx::query_scalar("SELECT COUNT(*) FROM service_inquiries WHERE status = 'PENDING'")
            .fetch_one(&state.db),
        sqlx::query_scalar("SELECT COUNT(*) FROM quote_requests WHERE status = 'PENDING'")
            .fetch_one(&state.db),
    )?;

    Ok(Json(UnifiedCounts {
        total: inquiries + service_inquiries + quote_requests,
        inquiries,
        service_inquiries,
        quote_requests,
    }))
}

/// PATCH /unified-inquiries/:kind/:id/status - admin
pub async fn update_status(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, i64)>,
    Json(req): Json<UpdateUnifiedStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;

    let rows_affected = match kind {
        InquiryKind::General => {
            // General inquiries track lifecycle via is_read/reply. The
            // canned reply never stamps replied_at; only the real reply
            // endpoint does.
            let (_, reply) = general_status_patch(req.status);
            sqlx::query(
                "UPDATE inquiries SET is_read = TRUE, reply = COALESCE($2, reply) WHERE id = $1",
            )
            .bind(id)
            .bind(reply)
            .execute(&state.db)
            .await?
            .rows_affected()
        }
        InquiryKind::Service => sqlx::query(
            "UPDATE service_inquiries \
             SET status = $2, \
                 shared_at = CASE WHEN $2 = 'SHARED' THEN NOW() ELSE shared_at END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(req.status.to_string())
        .execute(&state.db)
        .await?
        .rows_affected(),
        InquiryKind::Quote => sqlx::query("UPDATE quote_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(req.status.to_string())
            .execute(&state.db)
            .await?
            .rows_affected(),
    };

    if rows_affected == 0 {
        return Err(ApiError::not_found("Inquiry not found"));
    }

    tracing::info!(kind = %kind, id, status = %req.status, "Inquiry status updated");

    Ok(Json(MessageResponse::new("Status updated")))
}

#[derive(Serialize)]
struct ShareMessageResponse {
    message: String,
}

/// GET /unified-inquiries/:kind/:id/share-message
pub async fn share_message(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let base = &state.settings.share_base_url;

    let message = match kind {
        InquiryKind::General => {
            #[derive(sqlx::FromRow)]
            struct Row {
                name: String,
                content: String,
            }
            let row = sqlx::query_as::<_, Row>("SELECT name, content FROM inquiries WHERE id = $1")
                .bind(id)
                .fetch_optional(&state.db)
                .await?
                .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

            crate::domain::unified::general_share_message(
                &GeneralShareInfo {
                    id,
                    name: row.name,
                    content: Some(row.content),
                },
                base,
            )
        }
        InquiryKind::Service => {
            #[derive(sqlx::FromRow)]
            struct Row {
                region_sido: String,
                region_sigungu: String,
                service_type: String,
                description: Option<String>,
                vehicle_number: Option<String>,
                vehicle_model: Option<String>,
            }
            let row = sqlx::query_as::<_, Row>(
                "SELECT region_sido, region_sigungu, service_type, description, \
                        vehicle_number, vehicle_model \
                 FROM service_inquiries WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Service inquiry not found"))?;

            crate::domain::unified::service_share_message(
                &ServiceShareInfo {
                    id,
                    region_sido: row.region_sido,
                    region_sigungu: row.region_sigungu,
                    service_type_label: service_type_label(&row.service_type),
                    description: row.description,
                    vehicle_number: row.vehicle_number,
                    vehicle_model: row.vehicle_model,
                },
                base,
            )
        }
        InquiryKind::Quote => {
            #[derive(sqlx::FromRow)]
            struct Row {
                customer_name: String,
                car_model: String,
                description: Option<String>,
            }
            let row = sqlx::query_as::<_, Row>(
                "SELECT customer_name, car_model, description FROM quote_requests WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Quote request not found"))?;

            crate::domain::unified::quote_share_message(
                &QuoteShareInfo {
                    id,
                    customer_name: row.customer_name,
                    car_model: row.car_model,
                    description: row.description,
                },
                base,
            )
        }
    };

    Ok(Json(ShareMessageResponse { message }))
}

/// GET /unified-inquiries/:kind/:id - share-link detail with role-based
/// phone redaction
pub async fn public_detail(
    OptionalAuth(context): OptionalAuth,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let show_phone = compute_show_phone(&state, &context).await?;
    let now = chrono::Utc::now();

    let detail = match kind {
        InquiryKind::General => {
            let inquiry = sqlx::query_as::<_, Inquiry>(
                "SELECT id, type, name, phone, business_name, content, is_read, reply, \
                        replied_at, created_at \
                 FROM inquiries WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

            project_general_detail(&inquiry, show_phone)
        }
        InquiryKind::Service => {
            #[derive(sqlx::FromRow)]
            struct ServiceDetailRow {
                #[sqlx(flatten)]
                inquiry: ServiceInquiry,
                customer_nickname: Option<String>,
                customer_phone: Option<String>,
            }

            let row = sqlx::query_as::<_, ServiceDetailRow>(
                "SELECT s.id, s.name, s.region_sido, s.region_sigungu, s.region_dong, \
                        s.service_type, s.description, s.phone, s.vehicle_number, \
                        s.vehicle_model, s.customer_id, s.mechanic_id, s.status, s.shared_at, \
                        s.created_at, c.nickname AS customer_nickname, \
                        c.phone AS customer_phone \
                 FROM service_inquiries s \
                 LEFT JOIN customers c ON c.id = s.customer_id \
                 WHERE s.id = $1",
            )
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Service inquiry not found"))?;

            project_service_detail(
                &row.inquiry,
                row.customer_nickname,
                row.customer_phone,
                show_phone,
                now,
            )
        }
        InquiryKind::Quote => {
            let quote = sqlx::query_as::<_, QuoteRequest>(
                "SELECT id, mechanic_id, customer_name, customer_phone, car_model, car_year, \
                        description, images, status, created_at \
                 FROM quote_requests WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Quote request not found"))?;

            let mechanic_name: Option<String> =
                sqlx::query_scalar("SELECT name FROM mechanics WHERE id = $1")
                    .bind(quote.mechanic_id)
                    .fetch_optional(&state.db)
                    .await?;

            project_quote_detail(&quote, mechanic_name, show_phone)
        }
    };

    Ok(Json(DataResponse::new(detail)))
}

/// DELETE /unified-inquiries/:kind/:id - admin hard delete
pub async fn delete(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;

    let query = match kind {
        InquiryKind::General => "DELETE FROM inquiries WHERE id = $1",
        InquiryKind::Service => "DELETE FROM service_inquiries WHERE id = $1",
        InquiryKind::Quote => "DELETE FROM quote_requests WHERE id = $1",
    };

    let result = sqlx::query(query).bind(id).execute(&state.db).await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Inquiry not found"));
    }

    tracing::info!(kind = %kind, id, "Inquiry deleted");

    Ok(NoContent)
}
