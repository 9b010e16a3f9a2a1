//! Response DTOs for Web API.
//!
//! Records use snake_case field names.

use serde::Serialize;

use crate::board::{Board, PaginatedResult, Post};
use crate::db::{ProfileFields, User};

/// User information in responses. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role level (0 member, 1 reviewer, 2 admin).
    pub role: i64,
    /// Gender and region fields.
    #[serde(flatten)]
    pub profile: ProfileFields,
    /// Registration timestamp.
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.level(),
            profile: user.profile,
            created_at: user.created_at,
        }
    }
}

/// `{"user": ...}` envelope. `null` when not logged in.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    /// The user, if any.
    pub user: Option<UserInfo>,
}

impl UserEnvelope {
    /// Wrap a user.
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    /// Envelope for anonymous callers.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

/// Board information in responses.
#[derive(Debug, Serialize)]
pub struct BoardInfo {
    /// Board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: Option<String>,
    /// Display order.
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Board> for BoardInfo {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            name: board.name,
            description: board.description,
            sort_order: board.sort_order,
            created_at: board.created_at,
        }
    }
}

/// `{"boards": [...]}` envelope.
#[derive(Debug, Serialize)]
pub struct BoardsResponse {
    /// Boards in display order.
    pub boards: Vec<BoardInfo>,
}

/// Post information in responses.
#[derive(Debug, Serialize)]
pub struct PostInfo {
    pub id: i64,
    pub board_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub is_notice: bool,
    /// 0 pending, 1 approved.
    pub status: i64,
    pub views: i64,
    pub created_at: String,
    pub updated_at: String,
    pub author_name: Option<String>,
    pub board_name: Option<String>,
}

impl From<Post> for PostInfo {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            board_id: post.board_id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            is_notice: post.is_notice,
            status: post.status.as_i64(),
            views: post.views,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author_name: post.author_name,
            board_name: post.board_name,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Current page number (1-based).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of visible posts.
    pub total: i64,
    /// Whether another page follows.
    pub has_more: bool,
}

/// `{"posts": [...]}` envelope, with `meta` for board listings.
#[derive(Debug, Serialize)]
pub struct PostsResponse {
    /// Posts.
    pub posts: Vec<PostInfo>,
    /// Page information. Absent for the notice list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl PostsResponse {
    /// Convert a list of posts.
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into_iter().map(PostInfo::from).collect(),
            meta: None,
        }
    }

    /// Convert one page of a board listing.
    pub fn paginated(page: PaginatedResult<Post>) -> Self {
        let meta = PaginationMeta {
            page: page.offset / page.limit.max(1) + 1,
            per_page: page.limit,
            total: page.total,
            has_more: page.has_more(),
        };
        Self {
            meta: Some(meta),
            ..Self::new(page.items)
        }
    }
}

/// `{"post": ...}` envelope.
#[derive(Debug, Serialize)]
pub struct PostEnvelope {
    /// The post.
    pub post: PostInfo,
}

/// Response to a successful post creation.
#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    /// ID of the new post.
    #[serde(rename = "postId")]
    pub post_id: i64,
}

/// Generic `{"message": ...}` response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
