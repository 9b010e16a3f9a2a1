//! Board handlers for Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::board::BoardService;
use crate::web::dto::{BoardInfo, BoardsResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/boards - List all boards in display order.
pub async fn list_boards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoardsResponse>, ApiError> {
    let boards = BoardService::new(&state.db).list_boards().await?;

    Ok(Json(BoardsResponse {
        boards: boards.into_iter().map(BoardInfo::from).collect(),
    }))
}
