//! Request DTOs for Web API.
//!
//! Request bodies use camelCase field names.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::validation::not_empty_trimmed;
use crate::board::{Pagination, PostContentUpdate};
use crate::db::ProfileFields;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Username and password are required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
    /// Email (optional).
    #[serde(default)]
    pub email: Option<String>,
    /// Gender and region fields (optional, free text).
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Username and password are required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

/// Create post request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Target board.
    #[serde(default)]
    #[validate(required(message = "Required fields are missing"))]
    pub board_id: Option<i64>,
    /// Post title.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Required fields are missing"))]
    pub title: String,
    /// Post content.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed", message = "Required fields are missing"))]
    pub content: String,
    /// Notice flag.
    #[serde(default)]
    pub is_notice: Option<bool>,
}

/// Update post request.
///
/// A numeric `status` makes this a moderation request; anything else is
/// a content edit by the author.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New content.
    #[serde(default)]
    pub content: Option<String>,
    /// New notice flag.
    #[serde(default)]
    pub is_notice: Option<bool>,
    /// Requested moderation status.
    #[serde(default)]
    pub status: Option<Value>,
}

/// What an update request asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum PostUpdateAction {
    /// Reviewer sets the status. Carries the raw requested value.
    SetStatus(i64),
    /// Author replaces the content.
    Edit(PostContentUpdate),
    /// Content edit with a missing or blank title or content.
    Incomplete,
}

impl UpdatePostRequest {
    /// Decide which kind of update this is.
    ///
    /// Non-integer numbers request status 0.
    pub fn action(self) -> PostUpdateAction {
        if let Some(Value::Number(n)) = &self.status {
            return PostUpdateAction::SetStatus(n.as_i64().unwrap_or(0));
        }

        match (self.title, self.content) {
            (Some(title), Some(content))
                if !title.trim().is_empty() && !content.trim().is_empty() =>
            {
                PostUpdateAction::Edit(PostContentUpdate::new(
                    title,
                    content,
                    self.is_notice.unwrap_or(false),
                ))
            }
            _ => PostUpdateAction::Incomplete,
        }
    }
}

/// Query parameters for `GET /api/posts`.
///
/// Kept as raw strings so malformed values can be reported as
/// JSON errors instead of extractor rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    /// Board to list.
    pub board_id: Option<String>,
    /// `true` to list notices instead.
    pub notices: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub per_page: Option<String>,
}

impl ListPostsQuery {
    /// Whether notices were requested.
    pub fn wants_notices(&self) -> bool {
        self.notices.as_deref() == Some("true")
    }

    /// Parsed board ID. `None` when missing or not an integer.
    pub fn board_id(&self) -> Option<i64> {
        self.board_id.as_deref()?.trim().parse().ok()
    }

    /// Requested page. Unparseable values fall back to the defaults.
    pub fn pagination(&self) -> Pagination {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse().ok());
        Pagination::from_page(parse(&self.page), parse(&self.per_page))
    }
}
