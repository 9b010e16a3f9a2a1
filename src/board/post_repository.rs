//! Post repository for modboard.
//!
//! Every operation is a single SQL statement. Ownership and status
//! conditions are folded into the WHERE clause instead of being checked
//! in a separate read.

use sqlx::{QueryBuilder, Sqlite};

use super::post::{NewPost, Post, PostContentUpdate, PostStatus};
use super::visibility::VisibilityFilter;
use crate::db::DbPool;
use crate::{ModboardError, Result};

const POST_SELECT: &str = "SELECT p.id, p.board_id, p.author_id, p.title, p.content, p.is_notice,
        p.status, p.views, p.created_at, p.updated_at,
        u.username AS author_name, b.name AS board_name
 FROM posts p
 LEFT JOIN users u ON u.id = p.author_id
 LEFT JOIN boards b ON b.id = p.board_id";

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new pending post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (board_id, author_id, title, content, is_notice, status, views)
             VALUES (?, ?, ?, ?, ?, ?, 0) RETURNING id",
        )
        .bind(new_post.board_id)
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.is_notice as i64)
        .bind(PostStatus::Pending.as_i64())
        .fetch_one(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ModboardError::NotFound("post".to_string()))
    }

    /// Get a post by ID, regardless of visibility.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let query = format!("{POST_SELECT} WHERE p.id = ?");
        let row: Option<PostRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    /// List posts in a board visible under `filter`.
    ///
    /// Notices come first, then newest first.
    pub async fn list_by_board(
        &self,
        board_id: i64,
        filter: VisibilityFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(POST_SELECT);
        query.push(" WHERE p.board_id = ");
        query.push_bind(board_id);
        push_visibility(&mut query, filter);
        query.push(" ORDER BY p.is_notice DESC, p.created_at DESC, p.id DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let rows: Vec<PostRow> = query
            .build_query_as()
            .fetch_all(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    /// Count posts in a board visible under `filter`.
    pub async fn count_by_board(&self, board_id: i64, filter: VisibilityFilter) -> Result<i64> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM posts p WHERE p.board_id = ");
        query.push_bind(board_id);
        push_visibility(&mut query, filter);

        let count: i64 = query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;
        Ok(count)
    }

    /// List approved notices across all boards, newest first.
    pub async fn list_notices(&self, limit: i64) -> Result<Vec<Post>> {
        let query = format!(
            "{POST_SELECT} WHERE p.is_notice = 1 AND p.status = ?
             ORDER BY p.created_at DESC, p.id DESC LIMIT ?"
        );
        let rows: Vec<PostRow> = sqlx::query_as(&query)
            .bind(PostStatus::Approved.as_i64())
            .bind(limit)
            .fetch_all(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    /// Replace title, content and notice flag, demoting the post to pending.
    ///
    /// Only matches when `author_id` wrote the post. Returns false otherwise.
    pub async fn update_content(
        &self,
        id: i64,
        author_id: i64,
        update: &PostContentUpdate,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE posts
             SET title = ?, content = ?, is_notice = ?, status = ?, updated_at = datetime('now')
             WHERE id = ? AND author_id = ?",
        )
        .bind(&update.title)
        .bind(&update.content)
        .bind(update.is_notice as i64)
        .bind(PostStatus::Pending.as_i64())
        .bind(id)
        .bind(author_id)
        .execute(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the moderation status. Returns false if the post doesn't exist.
    pub async fn set_status(&self, id: i64, status: PostStatus) -> Result<bool> {
        let result =
            sqlx::query("UPDATE posts SET status = ?, updated_at = datetime('now') WHERE id = ?")
                .bind(status.as_i64())
                .bind(id)
                .execute(self.pool)
                .await
                .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a post written by `author_id`.
    ///
    /// Returns false if the post doesn't exist or belongs to someone else.
    pub async fn delete(&self, id: i64, author_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ? AND author_id = ?")
            .bind(id)
            .bind(author_id)
            .execute(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Add one view to an approved post.
    ///
    /// Pending posts are left untouched. Returns true if a view was counted.
    pub async fn increment_views(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = ? AND status = ?")
            .bind(id)
            .bind(PostStatus::Approved.as_i64())
            .execute(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

fn push_visibility(query: &mut QueryBuilder<'_, Sqlite>, filter: VisibilityFilter) {
    match filter {
        VisibilityFilter::Everything => {}
        VisibilityFilter::ApprovedOrAuthoredBy(author_id) => {
            query.push(" AND (p.status = ");
            query.push_bind(PostStatus::Approved.as_i64());
            query.push(" OR p.author_id = ");
            query.push_bind(author_id);
            query.push(")");
        }
        VisibilityFilter::ApprovedOnly => {
            query.push(" AND p.status = ");
            query.push_bind(PostStatus::Approved.as_i64());
        }
    }
}

/// Internal struct for mapping database rows to Post.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    board_id: i64,
    author_id: i64,
    title: String,
    content: String,
    is_notice: i64,
    status: i64,
    views: i64,
    created_at: String,
    updated_at: String,
    author_name: Option<String>,
    board_name: Option<String>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            board_id: self.board_id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            is_notice: self.is_notice != 0,
            status: PostStatus::from_i64(self.status),
            views: self.views,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author_name: self.author_name,
            board_name: self.board_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, NewBoard};
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    struct Fixture {
        db: Database,
        board_id: i64,
        alice: i64,
        bob: i64,
    }

    async fn setup() -> Fixture {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let alice = users.create(&NewUser::new("alice", "h")).await.unwrap().id;
        let bob = users.create(&NewUser::new("bob", "h")).await.unwrap().id;
        let board_id = BoardRepository::new(db.pool())
            .create(&NewBoard::new("General"))
            .await
            .unwrap()
            .id;

        Fixture {
            db,
            board_id,
            alice,
            bob,
        }
    }

    #[tokio::test]
    async fn test_create_post_starts_pending() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let post = repo
            .create(&NewPost::new(f.board_id, f.alice, "Hello", "World"))
            .await
            .unwrap();

        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.views, 0);
        assert!(!post.is_notice);
        assert_eq!(post.author_name.as_deref(), Some("alice"));
        assert_eq!(post.board_name.as_deref(), Some("General"));
    }

    #[tokio::test]
    async fn test_create_post_unknown_board_fails() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let result = repo.create(&NewPost::new(999, f.alice, "Hello", "World")).await;
        assert!(matches!(result, Err(ModboardError::Database(_))));
    }

    #[tokio::test]
    async fn test_list_by_board_applies_filter() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let approved = repo
            .create(&NewPost::new(f.board_id, f.alice, "Approved", "a"))
            .await
            .unwrap();
        repo.set_status(approved.id, PostStatus::Approved).await.unwrap();
        repo.create(&NewPost::new(f.board_id, f.alice, "Alice pending", "b"))
            .await
            .unwrap();
        repo.create(&NewPost::new(f.board_id, f.bob, "Bob pending", "c"))
            .await
            .unwrap();

        let anon = repo
            .list_by_board(f.board_id, VisibilityFilter::ApprovedOnly, 0, 20)
            .await
            .unwrap();
        assert_eq!(anon.len(), 1);
        assert_eq!(anon[0].title, "Approved");

        let alice = repo
            .list_by_board(f.board_id, VisibilityFilter::ApprovedOrAuthoredBy(f.alice), 0, 20)
            .await
            .unwrap();
        let titles: Vec<&str> = alice.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Alice pending", "Approved"]);

        let everything = repo
            .list_by_board(f.board_id, VisibilityFilter::Everything, 0, 20)
            .await
            .unwrap();
        assert_eq!(everything.len(), 3);

        assert_eq!(
            repo.count_by_board(f.board_id, VisibilityFilter::ApprovedOnly)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            repo.count_by_board(f.board_id, VisibilityFilter::Everything)
                .await
                .unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_list_by_board_notices_first_and_paginated() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let notice = repo
            .create(&NewPost::new(f.board_id, f.alice, "Notice", "n").notice(true))
            .await
            .unwrap();
        for i in 0..3 {
            repo.create(&NewPost::new(f.board_id, f.alice, format!("Post {i}"), "x"))
                .await
                .unwrap();
        }

        let first_page = repo
            .list_by_board(f.board_id, VisibilityFilter::Everything, 0, 2)
            .await
            .unwrap();
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].id, notice.id);
        assert_eq!(first_page[1].title, "Post 2");

        let second_page = repo
            .list_by_board(f.board_id, VisibilityFilter::Everything, 2, 2)
            .await
            .unwrap();
        let titles: Vec<&str> = second_page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 1", "Post 0"]);
    }

    #[tokio::test]
    async fn test_list_notices_only_approved() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let approved = repo
            .create(&NewPost::new(f.board_id, f.alice, "Approved notice", "n").notice(true))
            .await
            .unwrap();
        repo.set_status(approved.id, PostStatus::Approved).await.unwrap();
        repo.create(&NewPost::new(f.board_id, f.alice, "Pending notice", "n").notice(true))
            .await
            .unwrap();
        let regular = repo
            .create(&NewPost::new(f.board_id, f.alice, "Regular", "r"))
            .await
            .unwrap();
        repo.set_status(regular.id, PostStatus::Approved).await.unwrap();

        let notices = repo.list_notices(10).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, approved.id);
        assert!(notices[0].is_notice);
    }

    #[tokio::test]
    async fn test_update_content_resets_status() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let post = repo
            .create(&NewPost::new(f.board_id, f.alice, "Old", "old"))
            .await
            .unwrap();
        repo.set_status(post.id, PostStatus::Approved).await.unwrap();

        let update = PostContentUpdate::new("New", "new", true);
        assert!(repo.update_content(post.id, f.alice, &update).await.unwrap());

        let post = repo.get_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(post.title, "New");
        assert_eq!(post.content, "new");
        assert!(post.is_notice);
        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.author_id, f.alice);
    }

    #[tokio::test]
    async fn test_update_content_by_other_user_is_noop() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let post = repo
            .create(&NewPost::new(f.board_id, f.alice, "Mine", "mine"))
            .await
            .unwrap();

        let update = PostContentUpdate::new("Stolen", "stolen", false);
        assert!(!repo.update_content(post.id, f.bob, &update).await.unwrap());

        let post = repo.get_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(post.title, "Mine");
    }

    #[tokio::test]
    async fn test_set_status_missing_post() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());
        assert!(!repo.set_status(404, PostStatus::Approved).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_only_by_author() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let post = repo
            .create(&NewPost::new(f.board_id, f.alice, "Mine", "mine"))
            .await
            .unwrap();

        assert!(!repo.delete(post.id, f.bob).await.unwrap());
        assert!(repo.get_by_id(post.id).await.unwrap().is_some());

        assert!(repo.delete(post.id, f.alice).await.unwrap());
        assert!(repo.get_by_id(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_increment_views_only_when_approved() {
        let f = setup().await;
        let repo = PostRepository::new(f.db.pool());

        let post = repo
            .create(&NewPost::new(f.board_id, f.alice, "Title", "body"))
            .await
            .unwrap();

        assert!(!repo.increment_views(post.id).await.unwrap());
        assert_eq!(repo.get_by_id(post.id).await.unwrap().unwrap().views, 0);

        repo.set_status(post.id, PostStatus::Approved).await.unwrap();
        assert!(repo.increment_views(post.id).await.unwrap());
        assert!(repo.increment_views(post.id).await.unwrap());
        assert_eq!(repo.get_by_id(post.id).await.unwrap().unwrap().views, 2);
    }
}
