//! Database schema and migrations for modboard.
//!
//! Migrations are applied in order; the schema_version table records
//! which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    username        TEXT NOT NULL UNIQUE,
    password        TEXT NOT NULL,           -- Argon2 hash
    email           TEXT,
    role            INTEGER NOT NULL DEFAULT 0,  -- 0 member, 1 reviewer, 2 admin
    gender          TEXT,
    region_level1   TEXT,
    region_level2   TEXT,
    region_level3   TEXT,
    region_level4   TEXT,
    region_level5   TEXT,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_role ON users(role);
"#,
    // v2: boards
    r#"
CREATE TABLE boards (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT,
    sort_order  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_boards_sort_order ON boards(sort_order);
"#,
    // v3: posts
    r#"
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id    INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
    author_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    is_notice   INTEGER NOT NULL DEFAULT 0,
    status      INTEGER NOT NULL DEFAULT 0,  -- 0 pending, 1 approved
    views       INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_board_id ON posts(board_id);
CREATE INDEX idx_posts_author_id ON posts(author_id);
CREATE INDEX idx_posts_status ON posts(status);
CREATE INDEX idx_posts_notice ON posts(is_notice, status);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_users_migration_has_role_column() {
        let users = MIGRATIONS[0];
        assert!(users.contains("CREATE TABLE users"));
        assert!(users.contains("role"));
        assert!(users.contains("username        TEXT NOT NULL UNIQUE"));
        assert!(!users.contains("NOCASE"));
    }

    #[test]
    fn test_posts_migration_defaults_to_pending() {
        let posts = MIGRATIONS[2];
        assert!(posts.contains("CREATE TABLE posts"));
        assert!(posts.contains("status      INTEGER NOT NULL DEFAULT 0"));
        assert!(posts.contains("views       INTEGER NOT NULL DEFAULT 0"));
    }
}
