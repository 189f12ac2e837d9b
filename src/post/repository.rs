//! Post repository for postboard.
//!
//! This module provides the SQL for post CRUD, filtered listings and
//! counter updates. Absence is reported as `None`/`false`; callers decide
//! whether that is an error.

use sqlx::QueryBuilder;

use super::page::Sort;
use super::types::{NewPost, Post, PostUpdate};
use crate::datetime::now_timestamp;
use crate::db::{DbBackend, DbPool};
use crate::{BoardError, Result};

/// Case-sensitive `position(needle in haystack)`; 0 when absent.
#[cfg(feature = "sqlite")]
const SQL_POSITION: &str = "instr";
#[cfg(feature = "postgres")]
const SQL_POSITION: &str = "strpos";

/// Two-argument maximum.
#[cfg(feature = "sqlite")]
const SQL_GREATEST: &str = "MAX";
#[cfg(feature = "postgres")]
const SQL_GREATEST: &str = "GREATEST";

const POST_COLUMNS: &str = "id, board_id, user_id, title, content, post_type, fixed, view_count,
                            comments_count, likes_count, created_at, updated_at";

/// Row filter shared by listings and their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Board(i64),
    User(i64),
    /// Title contains the keyword.
    Title(String),
    /// Content contains the keyword.
    Content(String),
    /// Title or content contains the keyword.
    TitleOrContent(String),
}

impl PostFilter {
    fn push_where(&self, query: &mut QueryBuilder<'_, DbBackend>) {
        match self {
            PostFilter::All => {}
            PostFilter::Board(board_id) => {
                query.push(" WHERE board_id = ").push_bind(*board_id);
            }
            PostFilter::User(user_id) => {
                query.push(" WHERE user_id = ").push_bind(*user_id);
            }
            PostFilter::Title(keyword) => {
                query.push(" WHERE ");
                push_contains(query, "title", keyword);
            }
            PostFilter::Content(keyword) => {
                query.push(" WHERE ");
                push_contains(query, "content", keyword);
            }
            PostFilter::TitleOrContent(keyword) => {
                query.push(" WHERE (");
                push_contains(query, "title", keyword);
                query.push(" OR ");
                push_contains(query, "content", keyword);
                query.push(")");
            }
        }
    }
}

// A positional match instead of LIKE keeps `%` and `_` literal and the
// comparison case sensitive on every backend.
fn push_contains(query: &mut QueryBuilder<'_, DbBackend>, column: &str, keyword: &str) {
    query
        .push(format!("{SQL_POSITION}({column}, "))
        .push_bind(keyword.to_string())
        .push(") > 0");
}

/// Counters that can be adjusted by a signed delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCounter {
    Likes,
    Comments,
}

impl PostCounter {
    fn column(&self) -> &'static str {
        match self {
            PostCounter::Likes => "likes_count",
            PostCounter::Comments => "comments_count",
        }
    }
}

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let now = now_timestamp();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (board_id, user_id, title, content, post_type, fixed, view_count,
                                comments_count, likes_count, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id",
        )
        .bind(new_post.board_id)
        .bind(new_post.user_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.post_type)
        .bind(new_post.fixed)
        .bind(new_post.view_count)
        .bind(new_post.comments_count)
        .bind(new_post.likes_count)
        .bind(&now)
        .bind(&now)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {id}")))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(post)
    }

    /// List every post in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id ASC");
        let posts = sqlx::query_as::<_, Post>(&query)
            .fetch_all(self.pool)
            .await?;
        Ok(posts)
    }

    /// List posts matching `filter`, ordered by `sort`.
    pub async fn list_paged(
        &self,
        filter: &PostFilter,
        sort: &Sort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let mut query: QueryBuilder<DbBackend> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        filter.push_where(&mut query);
        query
            .push(" ORDER BY ")
            .push(sort.to_sql())
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let posts = query.build_query_as::<Post>().fetch_all(self.pool).await?;
        Ok(posts)
    }

    /// Count posts matching `filter`.
    pub async fn count(&self, filter: &PostFilter) -> Result<i64> {
        let mut query: QueryBuilder<DbBackend> = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        filter.push_where(&mut query);

        let count: (i64,) = query.build_query_as().fetch_one(self.pool).await?;
        Ok(count.0)
    }

    /// Update a post by ID.
    ///
    /// Only fields that are set in the update will be modified, and
    /// `updated_at` is refreshed. Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<DbBackend> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content.clone());
        }
        separated.push("updated_at = ");
        separated.push_bind_unseparated(now_timestamp());

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID.
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add one to the view count in a single statement.
    pub async fn increment_view_count(&self, id: i64) -> Result<Option<Post>> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Add `delta` to a counter, never going below zero.
    pub async fn adjust_counter(
        &self,
        id: i64,
        counter: PostCounter,
        delta: i64,
    ) -> Result<Option<Post>> {
        let column = counter.column();
        let query = format!(
            "UPDATE posts SET {column} = {SQL_GREATEST}({column} + $1, 0) WHERE id = $2"
        );
        let result = sqlx::query(&query)
            .bind(delta)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Set the pin flag.
    pub async fn set_fixed(&self, id: i64, fixed: i16) -> Result<Option<Post>> {
        let result = sqlx::query("UPDATE posts SET fixed = $1, updated_at = $2 WHERE id = $3")
            .bind(fixed)
            .bind(now_timestamp())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }
}
