//! Community board domain types
//!
//! Posts and comments carry role-tagged authorship: an author is either a
//! customer or a shop owner, recorded as `author_role` plus the matching
//! foreign key. View/like/comment counts are denormalized onto the post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Role;

/// Who wrote a post/comment/like
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorRole {
    Customer,
    Owner,
}

impl AuthorRole {
    /// Community authorship only distinguishes customers from owners;
    /// admins post as owners.
    pub fn from_token_role(role: Role) -> Self {
        match role {
            Role::Customer => Self::Customer,
            Role::Owner | Role::Admin => Self::Owner,
        }
    }
}

impl From<String> for AuthorRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OWNER" => Self::Owner,
            _ => Self::Customer,
        }
    }
}

impl std::fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "CUSTOMER"),
            Self::Owner => write!(f, "OWNER"),
        }
    }
}

/// Post list entry with the resolved author display name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub author_role: String,
    pub author_name: Option<String>,
    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Full post row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_role: String,
    pub author_name: Option<String>,
    pub customer_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Comment with resolved author name; replies nest one level
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub author_role: String,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Post detail: the post plus its top-level comments and replies
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<CommentThread>,
}

#[derive(Debug, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

/// Post list filters
#[derive(Debug, Deserialize, Default)]
pub struct PostFilter {
    #[serde(default)]
    pub category: Option<String>,
    /// `latest` (default) or `popular`
    #[serde(default)]
    pub sort: Option<String>,
}

/// Like toggle outcome: new liked state and the counter delta to apply
pub fn like_transition(already_liked: bool) -> (bool, i32) {
    if already_liked {
        (false, -1)
    } else {
        (true, 1)
    }
}

/// Group a flat, chronologically ordered comment list into top-level
/// threads with their replies. Replies to unknown parents are dropped.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let mut threads: Vec<CommentThread> = Vec::new();
    let mut index: std::collections::HashMap<i64, usize> = std::collections::HashMap::new();

    for comment in comments {
        match comment.parent_id {
            None => {
                index.insert(comment.id, threads.len());
                threads.push(CommentThread {
                    comment,
                    replies: Vec::new(),
                });
            }
            Some(parent_id) => {
                if let Some(&i) = index.get(&parent_id) {
                    threads[i].replies.push(comment);
                }
            }
        }
    }

    threads
}

/// Author-only guard for post/comment mutations: the caller must match the
/// row's role-tagged foreign key.
pub fn is_author(
    author_role: AuthorRole,
    customer_id: Option<i64>,
    owner_id: Option<i64>,
    caller_role: AuthorRole,
    caller_id: i64,
) -> bool {
    if author_role != caller_role {
        return false;
    }
    match caller_role {
        AuthorRole::Customer => customer_id == Some(caller_id),
        AuthorRole::Owner => owner_id == Some(caller_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_check_matches_role_and_id() {
        assert!(is_author(
            AuthorRole::Customer,
            Some(7),
            None,
            AuthorRole::Customer,
            7
        ));
        assert!(is_author(
            AuthorRole::Owner,
            None,
            Some(3),
            AuthorRole::Owner,
            3
        ));
    }

    #[test]
    fn author_check_rejects_other_accounts() {
        // Same role, different account
        assert!(!is_author(
            AuthorRole::Customer,
            Some(7),
            None,
            AuthorRole::Customer,
            8
        ));
        // Same numeric id, different role
        assert!(!is_author(
            AuthorRole::Customer,
            Some(7),
            None,
            AuthorRole::Owner,
            7
        ));
    }

    #[test]
    fn like_toggled_twice_returns_to_start() {
        let (liked, d1) = like_transition(false);
        assert!(liked);
        let (liked, d2) = like_transition(liked);
        assert!(!liked);
        assert_eq!(d1 + d2, 0);
    }

    fn comment(id: i64, parent_id: Option<i64>) -> Comment {
        Comment {
            id,
            post_id: 1,
            parent_id,
            content: format!("comment {}", id),
            author_role: "CUSTOMER".into(),
            author_name: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn threads_group_replies_under_parents() {
        let threads = build_threads(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
            comment(5, Some(3)),
        ]);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].comment.id, 1);
        assert_eq!(
            threads[0].replies.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert_eq!(threads[1].replies.len(), 1);
    }

    #[test]
    fn replies_to_missing_parents_are_dropped() {
        let threads = build_threads(vec![comment(1, None), comment(2, Some(99))]);
        assert_eq!(threads.len(), 1);
        assert!(threads[0].replies.is_empty());
    }

    #[test]
    fn admin_tokens_author_as_owner() {
        assert_eq!(AuthorRole::from_token_role(Role::Admin), AuthorRole::Owner);
        assert_eq!(
            AuthorRole::from_token_role(Role::Customer),
            AuthorRole::Customer
        );
    }
}
