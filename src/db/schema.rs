//! Database schema and migrations for postboard.
//!
//! Migrations are applied in order when a database is opened; the
//! `schema_version` table records which ones already ran.

/// Database migrations (SQLite dialect).
#[cfg(feature = "sqlite")]
pub const MIGRATIONS: &[&str] = &[
    // v1: Posts table
    r#"
CREATE TABLE posts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,  -- AUTOINCREMENT: ids are never reused
    board_id        INTEGER NOT NULL,
    user_id         INTEGER NOT NULL,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    post_type       INTEGER NOT NULL DEFAULT 0,
    fixed           INTEGER NOT NULL DEFAULT 0,         -- 1 = pinned
    view_count      INTEGER NOT NULL DEFAULT 0,
    comments_count  INTEGER NOT NULL DEFAULT 0,
    likes_count     INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
"#,
    // v2: Lookup indexes
    r#"
CREATE INDEX idx_posts_board_id ON posts(board_id);
CREATE INDEX idx_posts_user_id ON posts(user_id);
CREATE INDEX idx_posts_view_count ON posts(view_count);
"#,
];

/// Database migrations (PostgreSQL dialect).
#[cfg(feature = "postgres")]
pub const MIGRATIONS: &[&str] = &[
    // v1: Posts table
    r#"
CREATE TABLE posts (
    id              BIGSERIAL PRIMARY KEY,
    board_id        BIGINT NOT NULL,
    user_id         BIGINT NOT NULL,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    post_type       SMALLINT NOT NULL DEFAULT 0,
    fixed           SMALLINT NOT NULL DEFAULT 0,
    view_count      BIGINT NOT NULL DEFAULT 0,
    comments_count  BIGINT NOT NULL DEFAULT 0,
    likes_count     BIGINT NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
"#,
    // v2: Lookup indexes
    r#"
CREATE INDEX idx_posts_board_id ON posts(board_id);
CREATE INDEX idx_posts_user_id ON posts(user_id);
CREATE INDEX idx_posts_view_count ON posts(view_count);
"#,
];
