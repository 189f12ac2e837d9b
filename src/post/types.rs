//! Post model for postboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::datetime::parse_timestamp;
use crate::{BoardError, Result};

/// Value of `fixed` for a pinned post.
pub const FIXED: i16 = 1;
/// Value of `fixed` for a regular post.
pub const NOT_FIXED: i16 = 0;

/// Post entity as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID, assigned on insert and never reused.
    pub id: i64,
    /// ID of the owning board.
    pub board_id: i64,
    /// ID of the author.
    pub user_id: i64,
    /// Post title.
    pub title: String,
    /// Post content.
    pub content: String,
    /// Application-defined post kind.
    pub post_type: i16,
    /// Pin flag (`FIXED` or `NOT_FIXED`).
    pub fixed: i16,
    /// Number of times the post was viewed.
    pub view_count: i64,
    /// Number of comments.
    pub comments_count: i64,
    /// Number of likes.
    pub likes_count: i64,
    /// Creation timestamp (UTC).
    pub created_at: String,
    /// Last title/content change (UTC).
    pub updated_at: String,
}

impl Post {
    /// Check if this post is pinned.
    pub fn is_fixed(&self) -> bool {
        self.fixed == FIXED
    }

    /// Replace the title locally; persist with `PostStore::update`.
    pub fn update_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Replace the content locally; persist with `PostStore::update`.
    pub fn update_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }

    /// Creation time, if the stored value parses.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Last update time, if the stored value parses.
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// ID of the owning board.
    pub board_id: i64,
    /// ID of the author.
    pub user_id: i64,
    /// Post title.
    pub title: String,
    /// Post content.
    pub content: String,
    /// Post kind (defaults to 0).
    pub post_type: i16,
    /// Pin flag (defaults to `NOT_FIXED`).
    pub fixed: i16,
    /// Initial view count (defaults to 0).
    pub view_count: i64,
    /// Initial comment count (defaults to 0).
    pub comments_count: i64,
    /// Initial like count (defaults to 0).
    pub likes_count: i64,
}

impl NewPost {
    /// Create a new post with the required fields.
    pub fn new(
        board_id: i64,
        user_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            board_id,
            user_id,
            title: title.into(),
            content: content.into(),
            post_type: 0,
            fixed: NOT_FIXED,
            view_count: 0,
            comments_count: 0,
            likes_count: 0,
        }
    }

    /// Start a builder where every required field must be set explicitly.
    pub fn builder() -> NewPostBuilder {
        NewPostBuilder::default()
    }

    /// Set the post type.
    pub fn with_post_type(mut self, post_type: i16) -> Self {
        self.post_type = post_type;
        self
    }

    /// Set the pin flag.
    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = if fixed { FIXED } else { NOT_FIXED };
        self
    }

    /// Set the initial view count.
    pub fn with_view_count(mut self, view_count: i64) -> Self {
        self.view_count = view_count;
        self
    }

    /// Set the initial comment count.
    pub fn with_comments_count(mut self, comments_count: i64) -> Self {
        self.comments_count = comments_count;
        self
    }

    /// Set the initial like count.
    pub fn with_likes_count(mut self, likes_count: i64) -> Self {
        self.likes_count = likes_count;
        self
    }

    /// Check that the post can be persisted.
    pub fn validate(&self) -> Result<()> {
        if self.board_id <= 0 {
            return Err(BoardError::Validation("board_id is required".to_string()));
        }
        if self.user_id <= 0 {
            return Err(BoardError::Validation("user_id is required".to_string()));
        }
        validate_text("title", &self.title)?;
        validate_text("content", &self.content)?;
        if self.fixed != FIXED && self.fixed != NOT_FIXED {
            return Err(BoardError::Validation(format!(
                "fixed must be {NOT_FIXED} or {FIXED}, got {}",
                self.fixed
            )));
        }
        if self.view_count < 0 || self.comments_count < 0 || self.likes_count < 0 {
            return Err(BoardError::Validation(
                "counters must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Fluent builder for [`NewPost`].
///
/// `build` fails with a validation error naming the first missing
/// required field.
#[derive(Debug, Clone, Default)]
pub struct NewPostBuilder {
    board_id: Option<i64>,
    user_id: Option<i64>,
    title: Option<String>,
    content: Option<String>,
    post_type: i16,
    fixed: i16,
    view_count: i64,
    comments_count: i64,
    likes_count: i64,
}

impl NewPostBuilder {
    pub fn board_id(mut self, board_id: i64) -> Self {
        self.board_id = Some(board_id);
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn post_type(mut self, post_type: i16) -> Self {
        self.post_type = post_type;
        self
    }

    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = if fixed { FIXED } else { NOT_FIXED };
        self
    }

    pub fn view_count(mut self, view_count: i64) -> Self {
        self.view_count = view_count;
        self
    }

    pub fn comments_count(mut self, comments_count: i64) -> Self {
        self.comments_count = comments_count;
        self
    }

    pub fn likes_count(mut self, likes_count: i64) -> Self {
        self.likes_count = likes_count;
        self
    }

    /// Finish the builder, validating the result.
    pub fn build(self) -> Result<NewPost> {
        let missing = |field: &str| BoardError::Validation(format!("{field} is required"));

        let post = NewPost {
            board_id: self.board_id.ok_or_else(|| missing("board_id"))?,
            user_id: self.user_id.ok_or_else(|| missing("user_id"))?,
            title: self.title.ok_or_else(|| missing("title"))?,
            content: self.content.ok_or_else(|| missing("content"))?,
            post_type: self.post_type,
            fixed: self.fixed,
            view_count: self.view_count,
            comments_count: self.comments_count,
            likes_count: self.likes_count,
        };
        post.validate()?;
        Ok(post)
    }
}

/// Data for updating an existing post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set new content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Reject blank replacements.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            validate_text("title", title)?;
        }
        if let Some(ref content) = self.content {
            validate_text("content", content)?;
        }
        Ok(())
    }
}

impl From<&Post> for PostUpdate {
    fn from(post: &Post) -> Self {
        Self {
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
        }
    }
}
