//! Board service for modboard.
//!
//! This module provides high-level operations for boards and posts with
//! visibility filtering, moderation and pagination support.

use tracing::info;

use crate::db::Database;
use crate::{ModboardError, Result};

use super::post::{NewPost, Post, PostContentUpdate, PostStatus};
use super::post_repository::PostRepository;
use super::repository::BoardRepository;
use super::types::Board;
use super::visibility::Viewer;

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for post content (in characters).
pub const MAX_CONTENT_LENGTH: usize = 20_000;

/// Number of notices returned by [`BoardService::list_notices`].
pub const NOTICE_LIMIT: i64 = 10;

/// Default page size for board listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validate a title string.
fn validate_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ModboardError::Validation("title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(ModboardError::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validate post content.
fn validate_content(content: &str) -> Result<()> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ModboardError::Validation("content is required".to_string()));
    }
    if trimmed.chars().count() > MAX_CONTENT_LENGTH {
        return Err(ModboardError::Validation(format!(
            "content must be at most {} characters",
            MAX_CONTENT_LENGTH
        )));
    }
    Ok(())
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Create new pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Create pagination for the first page with given limit.
    pub fn first(limit: i64) -> Self {
        Self { offset: 0, limit }
    }

    /// Build pagination from a 1-based page number and page size.
    ///
    /// Missing values use the defaults; out-of-range values are clamped.
    pub fn from_page(page: Option<i64>, per_page: Option<i64>) -> Self {
        let limit = per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = page.unwrap_or(1).max(1);
        Self {
            offset: (page - 1).saturating_mul(limit),
            limit,
        }
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current offset.
    pub offset: i64,
    /// Limit used for this query.
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}

/// Service for board and post operations with visibility checking.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all boards in display order.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        BoardRepository::new(self.db.pool()).list_all().await
    }

    /// List the posts of a board that `viewer` may see.
    ///
    /// An unknown board simply yields an empty page.
    pub async fn list_posts(
        &self,
        board_id: i64,
        viewer: &Viewer,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Post>> {
        let repo = PostRepository::new(self.db.pool());
        let filter = viewer.filter();
        let total = repo.count_by_board(board_id, filter).await?;
        let items = repo
            .list_by_board(board_id, filter, pagination.offset, pagination.limit)
            .await?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    /// List the most recent approved notices across all boards.
    pub async fn list_notices(&self) -> Result<Vec<Post>> {
        PostRepository::new(self.db.pool())
            .list_notices(NOTICE_LIMIT)
            .await
    }

    /// Fetch a single post as `viewer`.
    ///
    /// Hidden posts are reported as not found. Fetching an approved post
    /// counts one view, and the returned post reflects it.
    pub async fn get_post(&self, post_id: i64, viewer: &Viewer) -> Result<Post> {
        let repo = PostRepository::new(self.db.pool());
        let mut post = repo
            .get_by_id(post_id)
            .await?
            .filter(|post| viewer.can_view(post))
            .ok_or_else(|| ModboardError::NotFound("post".to_string()))?;

        if post.status.is_approved() && repo.increment_views(post_id).await? {
            post.views += 1;
        }

        Ok(post)
    }

    /// Create a pending post in an existing board.
    pub async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        validate_title(&new_post.title)?;
        validate_content(&new_post.content)?;

        if !BoardRepository::new(self.db.pool())
            .exists(new_post.board_id)
            .await?
        {
            return Err(ModboardError::NotFound("board".to_string()));
        }

        let post = PostRepository::new(self.db.pool()).create(new_post).await?;
        info!(
            post_id = post.id,
            board_id = post.board_id,
            author_id = post.author_id,
            "post created"
        );
        Ok(post)
    }

    /// Replace a post's content as its author. The post goes back to pending.
    ///
    /// A missing post and a post owned by someone else are indistinguishable
    /// to the caller: both are a permission error.
    pub async fn edit_post(
        &self,
        post_id: i64,
        editor_id: i64,
        update: &PostContentUpdate,
    ) -> Result<()> {
        validate_title(&update.title)?;
        validate_content(&update.content)?;

        let updated = PostRepository::new(self.db.pool())
            .update_content(post_id, editor_id, update)
            .await?;
        if !updated {
            return Err(ModboardError::Permission(
                "only the author can edit this post".to_string(),
            ));
        }

        info!(post_id, editor_id, "post edited, awaiting review");
        Ok(())
    }

    /// Set a post's moderation status as a reviewer.
    ///
    /// The requested value is normalized first; returns the stored status.
    pub async fn set_status(
        &self,
        post_id: i64,
        viewer: &Viewer,
        requested: i64,
    ) -> Result<PostStatus> {
        if !viewer.is_reviewer() {
            return Err(ModboardError::Permission(
                "reviewer role required".to_string(),
            ));
        }

        let status = PostStatus::from_requested(requested);
        let updated = PostRepository::new(self.db.pool())
            .set_status(post_id, status)
            .await?;
        if !updated {
            return Err(ModboardError::NotFound("post".to_string()));
        }

        info!(post_id, reviewer_id = ?viewer.id(), %status, "post status changed");
        Ok(status)
    }

    /// Delete a post as its author.
    pub async fn delete_post(&self, post_id: i64, requester_id: i64) -> Result<()> {
        let deleted = PostRepository::new(self.db.pool())
            .delete(post_id, requester_id)
            .await?;
        if !deleted {
            return Err(ModboardError::Permission(
                "only the author can delete this post".to_string(),
            ));
        }

        info!(post_id, requester_id, "post deleted");
        Ok(())
    }
}
