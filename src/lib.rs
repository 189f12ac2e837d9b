//! postboard - community board post store
//!
//! Stores board posts in a relational database and serves paged listings,
//! substring search and view-count rankings over them.

pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod post;

pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{BoardError, Result};
pub use post::{
    Direction, NewPost, Page, PageRequest, Post, PostRepository, PostStore, PostUpdate, Sort,
    SortField,
};
