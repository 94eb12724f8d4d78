//! Unified inquiry feed types
//!
//! The three contact-request tables (general inquiries, service inquiries,
//! quote requests) are projected into one read-only shape for admin triage.
//! Nothing here is persisted; the feed is recomputed on every list request.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Discriminant for the three contact-request sources.
///
/// Unknown strings are rejected at the parse boundary; every consumer
/// matches exhaustively on this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryKind {
    General,
    Service,
    Quote,
}

impl InquiryKind {
    /// Path segment used in share URLs
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Service => "service",
            Self::Quote => "quote",
        }
    }
}

impl std::str::FromStr for InquiryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GENERAL" => Ok(Self::General),
            "SERVICE" => Ok(Self::Service),
            "QUOTE" => Ok(Self::Quote),
            other => Err(format!("unknown inquiry kind: {}", other)),
        }
    }
}

impl std::fmt::Display for InquiryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "GENERAL"),
            Self::Service => write!(f, "SERVICE"),
            Self::Quote => write!(f, "QUOTE"),
        }
    }
}

/// Lead lifecycle status shared by the service-inquiry and quote-request
/// tables, and used as the unified feed's status vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    #[default]
    Pending,
    Shared,
    Connected,
    Completed,
}

impl From<String> for LeadStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SHARED" => Self::Shared,
            "CONNECTED" => Self::Connected,
            "COMPLETED" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Shared => write!(f, "SHARED"),
            Self::Connected => write!(f, "CONNECTED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// One entry in the merged feed
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedInquiry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: InquiryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_sido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_sigungu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub share_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanic_name: Option<String>,
}

/// Per-source pending counts for the admin badge
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedCounts {
    pub total: i64,
    pub inquiries: i64,
    pub service_inquiries: i64,
    pub quote_requests: i64,
}

/// Single-item projection for the public share-link endpoint.
///
/// `phone` is populated only for authorized callers, and never once a
/// service share has expired.
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedInquiryDetail {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: InquiryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_sido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_sigungu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanic_name: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expired: Option<bool>,
}

/// Request body for `PATCH /unified-inquiries/:kind/:id/status`
#[derive(Debug, Deserialize)]
pub struct UpdateUnifiedStatusRequest {
    pub status: LeadStatus,
}

/// Hours after which a shared service inquiry stops exposing the phone
pub const SHARE_EXPIRE_HOURS: i64 = 24;

/// Canned reply recorded when a general inquiry is closed from the feed
pub const GENERAL_COMPLETED_REPLY: &str = "확인 완료";

/// Derive the feed status for a general inquiry, which tracks lifecycle
/// through `is_read`/`reply` instead of a status column.
pub fn general_derived_status(is_read: bool, has_reply: bool) -> LeadStatus {
    match (is_read, has_reply) {
        (false, _) => LeadStatus::Pending,
        (true, true) => LeadStatus::Completed,
        (true, false) => LeadStatus::Shared,
    }
}

/// Compute the column patch a status change applies to a general inquiry:
/// always marks it read, and COMPLETED records the canned reply.
pub fn general_status_patch(status: LeadStatus) -> (bool, Option<&'static str>) {
    let reply = match status {
        LeadStatus::Completed => Some(GENERAL_COMPLETED_REPLY),
        _ => None,
    };
    (true, reply)
}

/// Quote statuses collapse to PENDING / COMPLETED / SHARED in the feed
pub fn quote_feed_status(status: LeadStatus) -> LeadStatus {
    match status {
        LeadStatus::Pending => LeadStatus::Pending,
        LeadStatus::Completed => LeadStatus::Completed,
        LeadStatus::Shared | LeadStatus::Connected => LeadStatus::Shared,
    }
}

/// Share link for an inquiry on the public site
pub fn share_url(base: &str, kind: InquiryKind, id: i64) -> String {
    format!("{}/inquiry/{}/{}", base, kind.path_segment(), id)
}

/// A shared service inquiry hides the phone 24 hours after sharing,
/// even from admins.
pub fn is_share_expired(shared_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match shared_at {
        Some(at) => now - at > Duration::hours(SHARE_EXPIRE_HOURS),
        None => false,
    }
}

/// Fields needed to render a general-inquiry share message
#[derive(Debug, Clone)]
pub struct GeneralShareInfo {
    pub id: i64,
    pub name: String,
    pub content: Option<String>,
}

/// Fields needed to render a service-inquiry share message
#[derive(Debug, Clone)]
pub struct ServiceShareInfo {
    pub id: i64,
    pub region_sido: String,
    pub region_sigungu: String,
    pub service_type_label: String,
    pub description: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_model: Option<String>,
}

/// Fields needed to render a quote-request share message
#[derive(Debug, Clone)]
pub struct QuoteShareInfo {
    pub id: i64,
    pub customer_name: String,
    pub car_model: String,
    pub description: Option<String>,
}

/// Share message for a service inquiry: region, service, vehicle, link.
/// Admins copy this into the shop's chat channel.
pub fn service_share_message(info: &ServiceShareInfo, base_url: &str) -> String {
    let mut msg = String::from("대표님~ 🙋 고객님 오셨습니다!\n\n");
    msg.push_str(&format!("📍 {} {}\n", info.region_sido, info.region_sigungu));
    msg.push_str(&format!("🔧 {}", info.service_type_label));
    if let Some(desc) = &info.description {
        msg.push_str(&format!(" - {}", desc));
    }
    msg.push('\n');
    if info.vehicle_number.is_some() || info.vehicle_model.is_some() {
        msg.push_str("🚗 ");
        if let Some(number) = &info.vehicle_number {
            msg.push_str(number);
        }
        if let Some(model) = &info.vehicle_model {
            msg.push_str(&format!(" ({})", model));
        }
        msg.push('\n');
    }
    msg.push_str("\n👇 전화번호 확인하러 가기\n");
    msg.push_str(&share_url(base_url, InquiryKind::Service, info.id));
    msg.push_str("\n\n빠를수록 좋아요! 오늘도 화이팅~ 💪");
    msg
}

/// Share message for a general inquiry
pub fn general_share_message(info: &GeneralShareInfo, base_url: &str) -> String {
    let mut msg = String::from("🚨 [긴급] 고객 문의 접수!\n\n");
    msg.push_str(&format!("👤 {}\n", info.name));
    if let Some(content) = &info.content {
        msg.push_str(&format!("📝 {}\n", content));
    }
    msg.push_str("📞 전화번호: 회원만 확인 가능\n");
    msg.push_str("\n👉 지금 확인하기:\n");
    msg.push_str(&share_url(base_url, InquiryKind::General, info.id));
    msg.push_str("\n\n⚡ 먼저 전화하는 정비사가 고객을 잡습니다\n");
    msg.push_str("(카카오 3초 가입 → 바로 전화번호 확인)");
    msg
}

/// Share message for a quote request
pub fn quote_share_message(info: &QuoteShareInfo, base_url: &str) -> String {
    let mut msg = String::from("🚨 [긴급] 견적 요청 접수!\n\n");
    msg.push_str(&format!("👤 {}\n", info.customer_name));
    msg.push_str(&format!("🚗 {}\n", info.car_model));
    if let Some(desc) = &info.description {
        msg.push_str(&format!("📝 {}\n", desc));
    }
    msg.push_str("📞 전화번호: 회원만 확인 가능\n");
    msg.push_str("\n👉 지금 확인하기:\n");
    msg.push_str(&share_url(base_url, InquiryKind::Quote, info.id));
    msg.push_str("\n\n⚡ 먼저 전화하는 정비사가 고객을 잡습니다\n");
    msg.push_str("(카카오 3초 가입 → 바로 전화번호 확인)");
    msg
}

/// Project a general inquiry for the public share-link endpoint
pub fn project_general_detail(
    inq: &crate::domain::inquiries::Inquiry,
    show_phone: bool,
) -> UnifiedInquiryDetail {
    UnifiedInquiryDetail {
        id: inq.id,
        kind: InquiryKind::General,
        name: Some(inq.name.clone()),
        phone: show_phone.then(|| inq.phone.clone()),
        region_sido: None,
        region_sigungu: None,
        service_type: None,
        description: Some(inq.content.clone()),
        vehicle_number: None,
        vehicle_model: None,
        business_name: inq.business_name.clone(),
        car_model: None,
        mechanic_name: None,
        status: general_derived_status(inq.is_read, inq.reply.is_some()),
        created_at: inq.created_at,
        shared_at: None,
        is_expired: None,
    }
}

/// Project a service inquiry for the public share-link endpoint.
///
/// Once a share is older than 24 hours the phone is withheld from every
/// caller, authorized or not.
pub fn project_service_detail(
    svc: &crate::domain::service_inquiries::ServiceInquiry,
    customer_nickname: Option<String>,
    customer_phone: Option<String>,
    show_phone: bool,
    now: DateTime<Utc>,
) -> UnifiedInquiryDetail {
    let expired = is_share_expired(svc.shared_at, now);
    let phone = if show_phone && !expired {
        svc.phone.clone().or(customer_phone)
    } else {
        None
    };

    UnifiedInquiryDetail {
        id: svc.id,
        kind: InquiryKind::Service,
        name: svc.name.clone().or(customer_nickname),
        phone,
        region_sido: Some(svc.region_sido.clone()),
        region_sigungu: Some(svc.region_sigungu.clone()),
        service_type: Some(svc.service_type.clone()),
        description: svc.description.clone(),
        vehicle_number: svc.vehicle_number.clone(),
        vehicle_model: svc.vehicle_model.clone(),
        business_name: None,
        car_model: None,
        mechanic_name: None,
        status: LeadStatus::from(svc.status.clone()),
        created_at: svc.created_at,
        shared_at: svc.shared_at,
        is_expired: Some(expired),
    }
}

/// Project a quote request for the public share-link endpoint
pub fn project_quote_detail(
    qr: &crate::domain::quote_requests::QuoteRequest,
    mechanic_name: Option<String>,
    show_phone: bool,
) -> UnifiedInquiryDetail {
    UnifiedInquiryDetail {
        id: qr.id,
        kind: InquiryKind::Quote,
        name: Some(qr.customer_name.clone()),
        phone: show_phone.then(|| qr.customer_phone.clone()),
        region_sido: None,
        region_sigungu: None,
        service_type: None,
        description: qr.description.clone(),
        vehicle_number: None,
        vehicle_model: None,
        business_name: None,
        car_model: Some(qr.car_model.clone()),
        mechanic_name,
        status: LeadStatus::from(qr.status.clone()),
        created_at: qr.created_at,
        shared_at: None,
        is_expired: None,
    }
}

/// Project a service inquiry into a feed entry. Row-level contact fields
/// win; otherwise the linked customer account fills them in.
pub fn project_service_feed(
    svc: crate::domain::service_inquiries::ServiceInquiry,
    customer_nickname: Option<String>,
    customer_phone: Option<String>,
    base: &str,
) -> UnifiedInquiry {
    let share_url = share_url(base, InquiryKind::Service, svc.id);
    UnifiedInquiry {
        id: svc.id,
        kind: InquiryKind::Service,
        name: svc.name.or(customer_nickname),
        phone: svc.phone.or(customer_phone),
        region_sido: Some(svc.region_sido),
        region_sigungu: Some(svc.region_sigungu),
        service_type: Some(svc.service_type),
        description: svc.description,
        status: LeadStatus::from(svc.status),
        created_at: svc.created_at,
        share_url,
        business_name: None,
        car_model: None,
        mechanic_name: None,
    }
}

/// Sort the concatenated feed newest-first and slice out one page.
///
/// The sort is stable, so entries with equal timestamps keep their
/// per-table concatenation order.
pub fn sort_and_paginate(
    mut entries: Vec<UnifiedInquiry>,
    page: u32,
    limit: u32,
) -> (Vec<UnifiedInquiry>, u64) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = entries.len() as u64;
    let start = ((page.max(1) - 1) * limit) as usize;
    let paged = entries
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    (paged, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entry(id: i64, kind: InquiryKind, created_at: DateTime<Utc>) -> UnifiedInquiry {
        UnifiedInquiry {
            id,
            kind,
            name: None,
            phone: None,
            region_sido: None,
            region_sigungu: None,
            service_type: None,
            description: None,
            status: LeadStatus::Pending,
            created_at,
            share_url: String::new(),
            business_name: None,
            car_model: None,
            mechanic_name: None,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn kind_parses_case_insensitively_and_rejects_unknown() {
        assert_eq!(InquiryKind::from_str("general").unwrap(), InquiryKind::General);
        assert_eq!(InquiryKind::from_str("SERVICE").unwrap(), InquiryKind::Service);
        assert_eq!(InquiryKind::from_str("Quote").unwrap(), InquiryKind::Quote);
        assert!(InquiryKind::from_str("TIRE").is_err());
        assert!(InquiryKind::from_str("").is_err());
    }

    #[test]
    fn feed_is_sorted_by_created_at_descending_across_kinds() {
        let entries = vec![
            entry(1, InquiryKind::General, at(100)),
            entry(2, InquiryKind::General, at(300)),
            entry(3, InquiryKind::Service, at(200)),
            entry(4, InquiryKind::Quote, at(400)),
        ];

        let (paged, total) = sort_and_paginate(entries, 1, 20);
        assert_eq!(total, 4);
        let ids: Vec<i64> = paged.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn pagination_slices_after_sorting() {
        let entries = (0..5)
            .map(|i| entry(i, InquiryKind::General, at(i * 10)))
            .collect();

        let (page2, total) = sort_and_paginate(entries, 2, 2);
        assert_eq!(total, 5);
        let ids: Vec<i64> = page2.iter().map(|e| e.id).collect();
        // Sorted desc: 4,3,2,1,0 — page 2 of size 2 is [2,1]
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn pagination_past_the_end_is_empty() {
        let entries = vec![entry(1, InquiryKind::Quote, at(1))];
        let (paged, total) = sort_and_paginate(entries, 9, 20);
        assert_eq!(total, 1);
        assert!(paged.is_empty());
    }

    #[test]
    fn ties_keep_concatenation_order() {
        let entries = vec![
            entry(1, InquiryKind::General, at(100)),
            entry(2, InquiryKind::Service, at(100)),
            entry(3, InquiryKind::Quote, at(100)),
        ];

        let (paged, _) = sort_and_paginate(entries, 1, 20);
        let ids: Vec<i64> = paged.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn general_status_derivation() {
        assert_eq!(general_derived_status(false, false), LeadStatus::Pending);
        assert_eq!(general_derived_status(false, true), LeadStatus::Pending);
        assert_eq!(general_derived_status(true, false), LeadStatus::Shared);
        assert_eq!(general_derived_status(true, true), LeadStatus::Completed);
    }

    #[test]
    fn completing_a_general_inquiry_records_canned_reply() {
        let (is_read, reply) = general_status_patch(LeadStatus::Completed);
        assert!(is_read);
        assert_eq!(reply, Some("확인 완료"));
    }

    #[test]
    fn non_completed_statuses_only_mark_read() {
        for status in [LeadStatus::Pending, LeadStatus::Shared, LeadStatus::Connected] {
            let (is_read, reply) = general_status_patch(status);
            assert!(is_read);
            assert_eq!(reply, None);
        }
    }

    #[test]
    fn quote_statuses_collapse_in_the_feed() {
        assert_eq!(quote_feed_status(LeadStatus::Pending), LeadStatus::Pending);
        assert_eq!(quote_feed_status(LeadStatus::Completed), LeadStatus::Completed);
        assert_eq!(quote_feed_status(LeadStatus::Shared), LeadStatus::Shared);
        assert_eq!(quote_feed_status(LeadStatus::Connected), LeadStatus::Shared);
    }

    #[test]
    fn share_urls_use_kind_path_segments() {
        assert_eq!(
            share_url("https://example.com", InquiryKind::Service, 7),
            "https://example.com/inquiry/service/7"
        );
        assert_eq!(
            share_url("https://example.com", InquiryKind::General, 1),
            "https://example.com/inquiry/general/1"
        );
    }

    fn sample_general() -> crate::domain::inquiries::Inquiry {
        crate::domain::inquiries::Inquiry {
            id: 1,
            inquiry_type: "CUSTOMER".into(),
            name: "김철수".into(),
            phone: "010-1234-5678".into(),
            business_name: None,
            content: "엔진 소음 문의".into(),
            is_read: false,
            reply: None,
            replied_at: None,
            created_at: at(1000),
        }
    }

    fn sample_service(shared_at: Option<DateTime<Utc>>) -> crate::domain::service_inquiries::ServiceInquiry {
        crate::domain::service_inquiries::ServiceInquiry {
            id: 2,
            name: None,
            region_sido: "서울특별시".into(),
            region_sigungu: "강남구".into(),
            region_dong: None,
            service_type: "TIRE".into(),
            description: Some("타이어 펑크".into()),
            phone: Some("010-2222-3333".into()),
            vehicle_number: None,
            vehicle_model: None,
            customer_id: None,
            mechanic_id: None,
            status: "SHARED".into(),
            shared_at,
            created_at: at(1000),
        }
    }

    fn sample_quote() -> crate::domain::quote_requests::QuoteRequest {
        crate::domain::quote_requests::QuoteRequest {
            id: 3,
            mechanic_id: 9,
            customer_name: "이영희".into(),
            customer_phone: "010-9999-0000".into(),
            car_model: "아반떼".into(),
            car_year: None,
            description: None,
            images: sqlx::types::Json(vec![]),
            status: "PENDING".into(),
            created_at: at(1000),
        }
    }

    #[test]
    fn detail_never_includes_phone_without_authorization() {
        assert_eq!(project_general_detail(&sample_general(), false).phone, None);
        assert_eq!(
            project_service_detail(&sample_service(None), None, None, false, at(2000)).phone,
            None
        );
        assert_eq!(project_quote_detail(&sample_quote(), None, false).phone, None);
    }

    #[test]
    fn detail_includes_phone_for_authorized_callers() {
        assert_eq!(
            project_general_detail(&sample_general(), true).phone.as_deref(),
            Some("010-1234-5678")
        );
        assert_eq!(
            project_service_detail(&sample_service(None), None, None, true, at(2000))
                .phone
                .as_deref(),
            Some("010-2222-3333")
        );
        assert_eq!(
            project_quote_detail(&sample_quote(), None, true).phone.as_deref(),
            Some("010-9999-0000")
        );
    }

    #[test]
    fn expired_service_share_hides_phone_even_when_authorized() {
        let svc = sample_service(Some(at(0)));
        let detail = project_service_detail(&svc, None, None, true, at(25 * 3600));
        assert_eq!(detail.phone, None);
        assert_eq!(detail.is_expired, Some(true));

        let fresh = project_service_detail(&svc, None, None, true, at(3600));
        assert!(fresh.phone.is_some());
        assert_eq!(fresh.is_expired, Some(false));
    }

    #[test]
    fn service_detail_falls_back_to_customer_contact() {
        let mut svc = sample_service(None);
        svc.phone = None;
        svc.name = None;
        let detail = project_service_detail(
            &svc,
            Some("닉네임".into()),
            Some("010-7777-8888".into()),
            true,
            at(2000),
        );
        assert_eq!(detail.name.as_deref(), Some("닉네임"));
        assert_eq!(detail.phone.as_deref(), Some("010-7777-8888"));
    }

    #[test]
    fn feed_falls_back_to_customer_contact() {
        let mut svc = sample_service(None);
        svc.name = None;
        svc.phone = None;
        let entry = project_service_feed(
            svc,
            Some("닉네임".into()),
            Some("010-7777-8888".into()),
            "https://example.com",
        );
        assert_eq!(entry.name.as_deref(), Some("닉네임"));
        assert_eq!(entry.phone.as_deref(), Some("010-7777-8888"));
    }

    #[test]
    fn feed_prefers_row_contact_over_customer() {
        let mut svc = sample_service(None);
        svc.name = Some("직접입력".into());
        let entry = project_service_feed(svc, Some("닉네임".into()), None, "https://example.com");
        assert_eq!(entry.name.as_deref(), Some("직접입력"));
        assert_eq!(entry.phone.as_deref(), Some("010-2222-3333"));
    }

    #[test]
    fn general_detail_derives_status_from_read_and_reply() {
        let mut inq = sample_general();
        assert_eq!(project_general_detail(&inq, false).status, LeadStatus::Pending);
        inq.is_read = true;
        assert_eq!(project_general_detail(&inq, false).status, LeadStatus::Shared);
        inq.reply = Some("답변".into());
        assert_eq!(project_general_detail(&inq, false).status, LeadStatus::Completed);
    }

    #[test]
    fn service_share_message_includes_region_service_and_link() {
        let msg = service_share_message(
            &ServiceShareInfo {
                id: 42,
                region_sido: "서울특별시".into(),
                region_sigungu: "강남구".into(),
                service_type_label: "🛞 타이어".into(),
                description: Some("타이어 펑크".into()),
                vehicle_number: Some("12가3456".into()),
                vehicle_model: Some("쏘나타".into()),
            },
            "https://example.com",
        );

        assert!(msg.contains("📍 서울특별시 강남구"));
        assert!(msg.contains("🔧 🛞 타이어 - 타이어 펑크"));
        assert!(msg.contains("🚗 12가3456 (쏘나타)"));
        assert!(msg.contains("https://example.com/inquiry/service/42"));
    }

    #[test]
    fn general_share_message_never_contains_the_phone() {
        let msg = general_share_message(
            &GeneralShareInfo {
                id: 7,
                name: "김철수".into(),
                content: Some("엔진 소음".into()),
            },
            "https://example.com",
        );

        assert!(msg.contains("👤 김철수"));
        assert!(msg.contains("📞 전화번호: 회원만 확인 가능"));
        assert!(msg.contains("https://example.com/inquiry/general/7"));
    }

    #[test]
    fn quote_share_message_includes_car_model_and_link() {
        let msg = quote_share_message(
            &QuoteShareInfo {
                id: 11,
                customer_name: "이영희".into(),
                car_model: "아반떼".into(),
                description: None,
            },
            "https://example.com",
        );

        assert!(msg.contains("🚗 아반떼"));
        assert!(msg.contains("https://example.com/inquiry/quote/11"));
        assert!(!msg.contains("📝"));
    }

    #[test]
    fn share_expiry_is_24_hours_after_shared_at() {
        let shared = at(0);
        assert!(!is_share_expired(Some(shared), at(23 * 3600)));
        assert!(is_share_expired(Some(shared), at(25 * 3600)));
        assert!(!is_share_expired(None, at(1_000_000)));
    }
}
