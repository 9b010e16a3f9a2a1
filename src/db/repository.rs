//! User repository for modboard.
//!
//! This module provides CRUD operations for users in the database.

use super::user::{NewUser, ProfileFields, Role, User};
use super::DbPool;
use crate::{ModboardError, Result};

const USER_COLUMNS: &str = "id, username, password, email, role, gender, region_level1,
    region_level2, region_level3, region_level4, region_level5, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let profile = &new_user.profile;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, password, email, role, gender, region_level1,
                                region_level2, region_level3, region_level4, region_level5)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.email)
        .bind(new_user.role.level())
        .bind(&profile.gender)
        .bind(&profile.region_level1)
        .bind(&profile.region_level2)
        .bind(&profile.region_level3)
        .bind(&profile.region_level4)
        .bind(&profile.region_level5)
        .fetch_one(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ModboardError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(row.map(UserRow::into_user))
    }

    /// Get a user by exact username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(username)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;

        Ok(row.map(UserRow::into_user))
    }

    /// Check if a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)",
        )
        .bind(username)
        .fetch_one(self.pool)
        .await
        .map_err(|e| ModboardError::Database(e.to_string()))?;
        Ok(exists)
    }

    /// Change a user's role.
    ///
    /// Administrative action only; not reachable over HTTP.
    /// Returns false if the user does not exist.
    pub async fn set_role(&self, id: i64, role: Role) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.level())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| ModboardError::Database(e.to_string()))?;
        Ok(count)
    }
}

/// Internal struct for mapping database rows to User.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    email: Option<String>,
    role: i64,
    gender: Option<String>,
    region_level1: Option<String>,
    region_level2: Option<String>,
    region_level3: Option<String>,
    region_level4: Option<String>,
    region_level5: Option<String>,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            password: self.password,
            email: self.email,
            role: Role::from_level(self.role),
            profile: ProfileFields {
                gender: self.gender,
                region_level1: self.region_level1,
                region_level2: self.region_level2,
                region_level3: self.region_level3,
                region_level4: self.region_level4,
                region_level5: self.region_level5,
            },
            created_at: self.created_at,
        }
    }
}
