//! Post model for modboard.
//!
//! This module defines the Post struct and its moderation status.

use std::fmt;

/// Moderation state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    /// Waiting for review. Visible only to the author and reviewers.
    #[default]
    Pending = 0,
    /// Approved and publicly visible.
    Approved = 1,
}

impl PostStatus {
    /// Integer value as stored in the database.
    pub fn as_i64(&self) -> i64 {
        *self as i64
    }

    /// Map a stored integer to a status. Anything but 1 is pending.
    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => PostStatus::Approved,
            _ => PostStatus::Pending,
        }
    }

    /// Normalize a status requested by a reviewer.
    ///
    /// Only 0 and 1 are meaningful; every other value becomes pending.
    ///
    /// # Examples
    ///
    /// ```
    /// use modboard::board::PostStatus;
    ///
    /// assert_eq!(PostStatus::from_requested(1), PostStatus::Approved);
    /// assert_eq!(PostStatus::from_requested(0), PostStatus::Pending);
    /// assert_eq!(PostStatus::from_requested(7), PostStatus::Pending);
    /// ```
    pub fn from_requested(value: i64) -> Self {
        Self::from_i64(value)
    }

    /// Check if the post is publicly visible.
    pub fn is_approved(&self) -> bool {
        *self == PostStatus::Approved
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Pending => write!(f, "pending"),
            PostStatus::Approved => write!(f, "approved"),
        }
    }
}

/// Post entity, joined with its author's username and board name.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the board this post belongs to.
    pub board_id: i64,
    /// ID of the user who created the post. Never changes.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Whether the post is a notice.
    pub is_notice: bool,
    /// Moderation state.
    pub status: PostStatus,
    /// Number of approved-post fetches.
    pub views: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
    /// Author's username, if the author still exists.
    pub author_name: Option<String>,
    /// Board name, if the board still exists.
    pub board_name: Option<String>,
}

/// Data for creating a new post. New posts always start pending.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub board_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub is_notice: bool,
}

impl NewPost {
    /// Create a new regular post.
    pub fn new(
        board_id: i64,
        author_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            board_id,
            author_id,
            title: title.into(),
            content: content.into(),
            is_notice: false,
        }
    }

    /// Flag the post as a notice.
    pub fn notice(mut self, is_notice: bool) -> Self {
        self.is_notice = is_notice;
        self
    }
}

/// Author edit of a post. Applying it demotes the post to pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContentUpdate {
    pub title: String,
    pub content: String,
    pub is_notice: bool,
}

impl PostContentUpdate {
    /// Create a content update.
    pub fn new(title: impl Into<String>, content: impl Into<String>, is_notice: bool) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            is_notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_i64() {
        assert_eq!(PostStatus::from_i64(0), PostStatus::Pending);
        assert_eq!(PostStatus::from_i64(1), PostStatus::Approved);
        assert_eq!(PostStatus::from_i64(2), PostStatus::Pending);
    }

    #[test]
    fn test_status_from_requested_normalizes() {
        assert_eq!(PostStatus::from_requested(1), PostStatus::Approved);
        assert_eq!(PostStatus::from_requested(0), PostStatus::Pending);
        assert_eq!(PostStatus::from_requested(-1), PostStatus::Pending);
        assert_eq!(PostStatus::from_requested(2), PostStatus::Pending);
        assert_eq!(PostStatus::from_requested(i64::MAX), PostStatus::Pending);
    }

    #[test]
    fn test_status_as_i64() {
        assert_eq!(PostStatus::Pending.as_i64(), 0);
        assert_eq!(PostStatus::Approved.as_i64(), 1);
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(PostStatus::default(), PostStatus::Pending);
        assert!(!PostStatus::default().is_approved());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PostStatus::Pending.to_string(), "pending");
        assert_eq!(PostStatus::Approved.to_string(), "approved");
    }

    #[test]
    fn test_new_post_builder() {
        let post = NewPost::new(1, 2, "Hello", "World").notice(true);
        assert_eq!(post.board_id, 1);
        assert_eq!(post.author_id, 2);
        assert!(post.is_notice);
    }
}
