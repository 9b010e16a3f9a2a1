//! Board repository for modboard.
//!
//! This module provides CRUD operations for boards in the database.

use super::types::{Board, NewBoard};
use crate::db::DbPool;
use crate::{ModboardError, Result};

/// Repository for board operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board in the database.
    ///
    /// Returns the created board with the assigned ID.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (name, description, sort_order) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_board.name)
        .bind(&new_board.description)
        .bind(new_board.sort_order)
        .fetch_one(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ModboardError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, sort_order, created_at FROM boards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(board)
    }

    /// List all boards ordered by sort_order.
    pub async fn list_all(&self) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, sort_order, created_at
             FROM boards ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(boards)
    }

    /// Count all boards.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
            .fetch_one(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Check if a board exists.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM boards WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_board() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("General").with_description("Anything goes"))
            .await
            .unwrap();

        assert_eq!(board.id, 1);
        assert_eq!(board.name, "General");
        assert_eq!(board.description.as_deref(), Some("Anything goes"));
        assert_eq!(board.sort_order, 0);
    }

    #[tokio::test]
    async fn test_duplicate_board_name_rejected() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        repo.create(&NewBoard::new("General")).await.unwrap();
        assert!(repo.create(&NewBoard::new("General")).await.is_err());
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());
        assert!(repo.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_sort_order() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        repo.create(&NewBoard::new("Third").with_sort_order(2)).await.unwrap();
        repo.create(&NewBoard::new("First").with_sort_order(0)).await.unwrap();
        repo.create(&NewBoard::new("Second").with_sort_order(1)).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_count_and_exists() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);

        let board = repo.create(&NewBoard::new("General")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.exists(board.id).await.unwrap());
        assert!(!repo.exists(board.id + 1).await.unwrap());
    }
}
