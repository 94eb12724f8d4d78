//! Community board routes
//!
//! Role-tagged authorship: posts and comments are written by customers or
//! owners (admins post as owners). View/like/comment counters are
//! denormalized onto the post and updated in place at write time; the
//! child write and the counter update are separate statements.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::community::{
    build_threads, is_author, like_transition, AuthorRole, Comment, CreateCommentRequest,
    CreatePostRequest, LikeResponse, Post, PostDetail, PostFilter, PostSummary,
};
use crate::error::ApiError;

const POST_SELECT: &str = "SELECT p.id, p.title, p.content, p.category, p.author_role, \
     COALESCE(c.nickname, o.name) AS author_name, p.customer_id, p.owner_id, \
     p.view_count, p.like_count, p.comment_count, p.created_at \
     FROM posts p \
     LEFT JOIN customers c ON p.author_role = 'CUSTOMER' AND p.customer_id = c.id \
     LEFT JOIN owners o ON p.author_role = 'OWNER' AND p.owner_id = o.id";

const COMMENT_SELECT: &str = "SELECT cm.id, cm.post_id, cm.parent_id, cm.content, \
     cm.author_role, COALESCE(c.nickname, o.name) AS author_name, cm.created_at \
     FROM comments cm \
     LEFT JOIN customers c ON cm.author_role = 'CUSTOMER' AND cm.customer_id = c.id \
     LEFT JOIN owners o ON cm.author_role = 'OWNER' AND cm.owner_id = o.id";

/// Split the caller into the role-tagged author columns
fn author_columns(auth: &RequireAuth) -> (AuthorRole, Option<i64>, Option<i64>) {
    let role = AuthorRole::from_token_role(auth.role);
    match role {
        AuthorRole::Customer => (role, Some(auth.account_id), None),
        AuthorRole::Owner => (role, None, Some(auth.account_id)),
    }
}

/// GET /community/posts - public list, category filter, latest|popular sort
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PostFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let order_by = match filter.sort.as_deref() {
        Some("popular") => "p.like_count DESC, p.created_at DESC",
        _ => "p.created_at DESC",
    };

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM posts \
         WHERE is_active = TRUE AND ($1::text IS NULL OR category = $1)",
    )
    .bind(&filter.category)
    .fetch_one(&state.db)
    .await?;

    let posts = sqlx::query_as::<_, PostSummary>(&format!(
        "SELECT p.id, p.title, p.category, p.author_role, \
                COALESCE(c.nickname, o.name) AS author_name, \
                p.view_count, p.like_count, p.comment_count, p.created_at \
         FROM posts p \
         LEFT JOIN customers c ON p.author_role = 'CUSTOMER' AND p.customer_id = c.id \
         LEFT JOIN owners o ON p.author_role = 'OWNER' AND p.owner_id = o.id \
         WHERE p.is_active = TRUE AND ($1::text IS NULL OR p.category = $1) \
         ORDER BY {order_by} LIMIT $2 OFFSET $3"
    ))
    .bind(&filter.category)
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Paginated::new(posts, &pagination, total as u64))
}

/// GET /community/posts/:id - public detail, increments view_count
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let updated =
        sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .execute(&state.db)
            .await?;

    if updated.rows_affected() == 0 {
        return Err(ApiError::not_found("Post not found"));
    }

    let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE p.id = $1"))
        .bind(id)
        .fetch_one(&state.db)
        .await?;

    let comments = sqlx::query_as::<_, Comment>(&format!(
        "{COMMENT_SELECT} WHERE cm.post_id = $1 AND cm.is_active = TRUE \
         ORDER BY cm.created_at ASC"
    ))
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DataResponse::new(PostDetail {
        post,
        comments: build_threads(comments),
    })))
}

/// POST /community/posts - authenticated
pub async fn create_post(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::bad_request("title and content are required"));
    }

    let (role, customer_id, owner_id) = author_columns(&auth);

    let post_id: i64 = sqlx::query_scalar(
        "INSERT INTO posts (title, content, category, author_role, customer_id, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.category)
    .bind(role.to_string())
    .bind(customer_id)
    .bind(owner_id)
    .fetch_one(&state.db)
    .await?;

    let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE p.id = $1"))
        .bind(post_id)
        .fetch_one(&state.db)
        .await?;

    tracing::info!(post_id, author_role = %role, "Post created");

    Ok(Created(DataResponse::new(post)))
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    author_role: String,
    customer_id: Option<i64>,
    owner_id: Option<i64>,
}

fn check_author(auth: &RequireAuth, row: &AuthorRow) -> Result<(), ApiError> {
    let caller_role = AuthorRole::from_token_role(auth.role);
    if !is_author(
        AuthorRole::from(row.author_role.clone()),
        row.customer_id,
        row.owner_id,
        caller_role,
        auth.account_id,
    ) {
        return Err(ApiError::forbidden("Only the author can do that"));
    }
    Ok(())
}

/// DELETE /community/posts/:id - author only
pub async fn delete_post(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = sqlx::query_as::<_, AuthorRow>(
        "SELECT author_role, customer_id, owner_id FROM posts \
         WHERE id = $1 AND is_active = TRUE",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Post not found"))?;

    check_author(&auth, &row)?;

    sqlx::query("UPDATE posts SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(NoContent)
}

/// POST /community/posts/:id/comments - authenticated, one reply level
pub async fn create_comment(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::bad_request("content is required"));
    }

    let post_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1 AND is_active = TRUE)")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;
    if !post_exists {
        return Err(ApiError::not_found("Post not found"));
    }

    if let Some(parent_id) = req.parent_id {
        #[derive(sqlx::FromRow)]
        struct ParentRow {
            post_id: i64,
            parent_id: Option<i64>,
        }
        let parent = sqlx::query_as::<_, ParentRow>(
            "SELECT post_id, parent_id FROM comments WHERE id = $1 AND is_active = TRUE",
        )
        .bind(parent_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Parent comment not found"))?;

        if parent.post_id != post_id {
            return Err(ApiError::bad_request("Parent comment belongs to another post"));
        }
        if parent.parent_id.is_some() {
            return Err(ApiError::bad_request("Replies only nest one level"));
        }
    }

    let (role, customer_id, owner_id) = author_columns(&auth);

    let comment_id: i64 = sqlx::query_scalar(
        "INSERT INTO comments (post_id, parent_id, content, author_role, customer_id, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(post_id)
    .bind(req.parent_id)
    .bind(&req.content)
    .bind(role.to_string())
    .bind(customer_id)
    .bind(owner_id)
    .fetch_one(&state.db)
    .await?;

    // Counter update is a separate statement; a failure here leaves the
    // count stale.
    sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = $1")
        .bind(post_id)
        .execute(&state.db)
        .await?;

    let comment = sqlx::query_as::<_, Comment>(&format!("{COMMENT_SELECT} WHERE cm.id = $1"))
        .bind(comment_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Created(DataResponse::new(comment)))
}

/// DELETE /community/comments/:id - author only
pub async fn delete_comment(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    #[derive(sqlx::FromRow)]
    struct CommentAuthorRow {
        post_id: i64,
        author_role: String,
        customer_id: Option<i64>,
        owner_id: Option<i64>,
    }

    let row = sqlx::query_as::<_, CommentAuthorRow>(
        "SELECT post_id, author_role, customer_id, owner_id FROM comments \
         WHERE id = $1 AND is_active = TRUE",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    check_author(
        &auth,
        &AuthorRow {
            author_role: row.author_role.clone(),
            customer_id: row.customer_id,
            owner_id: row.owner_id,
        },
    )?;

    sqlx::query("UPDATE comments SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    sqlx::query(
        "UPDATE posts SET comment_count = GREATEST(comment_count - 1, 0) WHERE id = $1",
    )
    .bind(row.post_id)
    .execute(&state.db)
    .await?;

    Ok(NoContent)
}

/// POST /community/posts/:id/like - authenticated toggle
pub async fn toggle_like(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1 AND is_active = TRUE)")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;
    if !post_exists {
        return Err(ApiError::not_found("Post not found"));
    }

    let (role, customer_id, owner_id) = author_columns(&auth);

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM post_likes \
         WHERE post_id = $1 AND author_role = $2 AND (customer_id = $3 OR owner_id = $4)",
    )
    .bind(post_id)
    .bind(role.to_string())
    .bind(customer_id)
    .bind(owner_id)
    .fetch_optional(&state.db)
    .await?;

    let (liked, delta) = like_transition(existing.is_some());

    match existing {
        Some(like_id) => {
            sqlx::query("DELETE FROM post_likes WHERE id = $1")
                .bind(like_id)
                .execute(&state.db)
                .await?;
        }
        None => {
            // The partial unique indexes catch a double-tap race
            let inserted = sqlx::query(
                "INSERT INTO post_likes (post_id, author_role, customer_id, owner_id) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(post_id)
            .bind(role.to_string())
            .bind(customer_id)
            .bind(owner_id)
            .execute(&state.db)
            .await;

            if let Err(e) = inserted {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23505") {
                        return Err(ApiError::Conflict("Already liked".into()));
                    }
                }
                return Err(e.into());
            }
        }
    }

    sqlx::query("UPDATE posts SET like_count = GREATEST(like_count + $2, 0) WHERE id = $1")
        .bind(post_id)
        .bind(delta)
        .execute(&state.db)
        .await?;

    Ok(Json(LikeResponse { liked }))
}
