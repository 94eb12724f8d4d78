pub mod auth;
pub mod community;
pub mod health;
pub mod inquiries;
pub mod mechanics;
pub mod owners;
pub mod quote_requests;
pub mod reviews;
pub mod service_inquiries;
pub mod sync;
pub mod unified_inquiries;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Auth (admin session)
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile))
        .route("/auth/logout", post(auth::logout))
        // General inquiries
        .route("/inquiries", post(inquiries::create_inquiry))
        .route("/inquiries", get(inquiries::list_inquiries))
        .route("/inquiries/unread-count", get(inquiries::unread_count))
        .route("/inquiries/:id", get(inquiries::get_inquiry))
        .route("/inquiries/:id/reply", patch(inquiries::reply_inquiry))
        .route("/inquiries/:id", delete(inquiries::delete_inquiry))
        // Service inquiries (lead funnel)
        .route(
            "/service-inquiries",
            post(service_inquiries::create_service_inquiry),
        )
        .route(
            "/service-inquiries",
            get(service_inquiries::list_service_inquiries),
        )
        .route("/service-inquiries/stats", get(service_inquiries::stats))
        .route(
            "/service-inquiries/:id",
            get(service_inquiries::get_service_inquiry),
        )
        .route(
            "/service-inquiries/:id/status",
            patch(service_inquiries::update_status),
        )
        // Quote requests
        .route("/quote-requests", post(quote_requests::create_quote_request))
        .route("/quote-requests", get(quote_requests::list_quote_requests))
        .route(
            "/quote-requests/mechanic/:id",
            get(quote_requests::list_by_mechanic),
        )
        .route(
            "/quote-requests/:id/status",
            patch(quote_requests::update_status),
        )
        .route(
            "/quote-requests/:id",
            delete(quote_requests::delete_quote_request),
        )
        // Unified inquiry feed (admin triage)
        .route("/unified-inquiries", get(unified_inquiries::list))
        .route("/unified-inquiries/count", get(unified_inquiries::counts))
        .route(
            "/unified-inquiries/:kind/:id/status",
            patch(unified_inquiries::update_status),
        )
        .route(
            "/unified-inquiries/:kind/:id/share-message",
            get(unified_inquiries::share_message),
        )
        // Share links resolve the public detail straight at /:kind/:id
        .route(
            "/unified-inquiries/:kind/:id",
            get(unified_inquiries::public_detail).delete(unified_inquiries::delete),
        )
        // Mechanic directory
        .route("/mechanics", get(mechanics::list_mechanics))
        .route("/mechanics", post(mechanics::create_mechanic))
        .route("/mechanics/:id", get(mechanics::get_mechanic))
        .route("/mechanics/:id", put(mechanics::update_mechanic))
        .route("/mechanics/:id", delete(mechanics::delete_mechanic))
        // Owner approval workflow
        .route("/owners", get(owners::list_owners))
        .route("/owners/me/reapply", post(owners::reapply))
        .route("/owners/me/mechanics", get(owners::list_my_mechanics))
        .route("/owners/me/mechanics", post(owners::create_my_mechanic))
        .route("/owners/me/mechanics/:id", put(owners::update_my_mechanic))
        .route(
            "/owners/me/mechanics/:id",
            delete(owners::delete_my_mechanic),
        )
        .route("/owners/:id", get(owners::get_owner))
        .route("/owners/:id/approve", patch(owners::approve_owner))
        .route("/owners/:id/reject", patch(owners::reject_owner))
        // Reviews
        .route("/reviews", post(reviews::create_review))
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews/pending-count", get(reviews::pending_count))
        .route("/reviews/mechanic/:id", get(reviews::list_for_mechanic))
        .route("/reviews/:id/approve", patch(reviews::approve_review))
        .route("/reviews/:id/reject", patch(reviews::reject_review))
        .route("/reviews/:id", delete(reviews::delete_review))
        // Community board
        .route("/community/posts", get(community::list_posts))
        .route("/community/posts", post(community::create_post))
        .route("/community/posts/:id", get(community::get_post))
        .route("/community/posts/:id", delete(community::delete_post))
        .route(
            "/community/posts/:id/comments",
            post(community::create_comment),
        )
        .route("/community/posts/:id/like", post(community::toggle_like))
        .route("/community/comments/:id", delete(community::delete_comment))
        // Device sync queue
        .route("/sync", post(sync::create_message))
        .route("/sync", get(sync::list_messages))
        .route("/sync/stats", get(sync::stats))
        .route("/sync/:id", get(sync::get_message))
        .route("/sync/:id", patch(sync::update_message))
        .route("/sync/:id", delete(sync::delete_message))
        // Image upload (multipart bodies exceed axum's 2MB default)
        .route(
            "/upload/image",
            post(upload::upload_image).layer(DefaultBodyLimit::max(upload::MAX_BODY_BYTES)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::auth::TokenSigner;
    use crate::config::{Environment, Settings};
    use crate::services::ImageStore;

    fn test_state() -> Arc<AppState> {
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/postgres")
            .unwrap();

        let settings = Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".into(),
            database_url: String::new(),
            database_max_connections: 1,
            cors_allow_origins: vec![],
            jwt_secret: "test-secret".into(),
            jwt_ttl_seconds: 3600,
            share_base_url: "https://example.com".into(),
            upload_dir: "/tmp".into(),
            upload_public_base_url: "http://localhost/uploads".into(),
            telegram_bot_token: None,
            telegram_chat_id: None,
        };

        AppState::new(
            db,
            settings,
            TokenSigner::new("test-secret", 3600),
            ImageStore::new("/tmp", "http://localhost/uploads"),
            None,
        )
    }

    #[tokio::test]
    async fn share_link_detail_is_served_at_kind_and_id() {
        let app = api_router().with_state(test_state());

        // An unknown kind is rejected inside the handler before any
        // database access, so a 400 (not 404/405) shows the GET route
        // matches directly at /:kind/:id.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/unified-inquiries/tire/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
