//! Post handlers for Web API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardService, NewPost};
use crate::web::dto::{
    CreatePostRequest, CreatedPostResponse, ListPostsQuery, MessageResponse, PostEnvelope,
    PostUpdateAction, PostsResponse, UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// Parse a post ID from the path. Anything unparseable cannot name a post.
fn parse_post_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found("post not found"))
}

/// GET /api/posts - List a board's visible posts, or the latest notices.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    viewer: OptionalAuthUser,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostsResponse>, ApiError> {
    let service = BoardService::new(&state.db);

    if query.wants_notices() {
        let notices = service.list_notices().await?;
        return Ok(Json(PostsResponse::new(notices)));
    }

    let board_id = query
        .board_id()
        .ok_or_else(|| ApiError::bad_request("boardId is required"))?;

    let page = service
        .list_posts(board_id, &viewer.viewer(), query.pagination())
        .await?;

    Ok(Json(PostsResponse::paginated(page)))
}

/// POST /api/posts - Create a pending post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), ApiError> {
    let board_id = req
        .board_id
        .ok_or_else(|| ApiError::bad_request("Required fields are missing"))?;

    let new_post = NewPost::new(board_id, user.id, req.title, req.content)
        .notice(req.is_notice.unwrap_or(false));
    let post = BoardService::new(&state.db).create_post(&new_post).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse { post_id: post.id }),
    ))
}

/// GET /api/posts/:id - Fetch a visible post, counting a view if approved.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    viewer: OptionalAuthUser,
    Path(id): Path<String>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let post = BoardService::new(&state.db)
        .get_post(post_id, &viewer.viewer())
        .await?;

    Ok(Json(PostEnvelope { post: post.into() }))
}

/// PUT /api/posts/:id - Edit content as the author, or set status as a reviewer.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let Json(req) = payload
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;
    let service = BoardService::new(&state.db);

    match req.action() {
        PostUpdateAction::SetStatus(requested) => {
            service
                .set_status(post_id, &auth.viewer(), requested)
                .await?;
            Ok(Json(MessageResponse::new("Post status updated")))
        }
        PostUpdateAction::Edit(update) => {
            service.edit_post(post_id, auth.0.id, &update).await?;
            Ok(Json(MessageResponse::new(
                "Post updated and awaiting review",
            )))
        }
        PostUpdateAction::Incomplete => {
            Err(ApiError::bad_request("Title and content are required"))
        }
    }
}

/// DELETE /api/posts/:id - Delete a post as its author.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post_id = parse_post_id(&id)?;
    BoardService::new(&state.db)
        .delete_post(post_id, user.id)
        .await?;

    Ok(Json(MessageResponse::new("Post deleted")))
}
