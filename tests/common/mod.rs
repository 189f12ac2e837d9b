//! Shared helpers for postboard integration tests.

#![allow(dead_code)]

use postboard::{Database, NewPost, Post, PostStore};

pub const BOARD_ID: i64 = 1;
pub const USER_ID: i64 = 1;

/// Open a fresh, migrated in-memory database.
pub async fn setup_db() -> Database {
    Database::open_in_memory().await.unwrap()
}

/// A post on the default board by the default user, built the long way.
pub fn new_post(title: impl Into<String>, content: impl Into<String>) -> NewPost {
    NewPost::builder()
        .board_id(BOARD_ID)
        .user_id(USER_ID)
        .title(title)
        .content(content)
        .post_type(0)
        .fixed(false)
        .view_count(0)
        .comments_count(0)
        .likes_count(0)
        .build()
        .unwrap()
}

/// Create a post on `board_id` and return it.
pub async fn create_on_board(store: &PostStore<'_>, board_id: i64, title: &str) -> Post {
    store
        .create(&NewPost::new(board_id, USER_ID, title, "content"))
        .await
        .unwrap()
}
