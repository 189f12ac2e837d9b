//! Post module for postboard.
//!
//! This module provides post storage and querying:
//! - Post model and builders
//! - Paging and sorting
//! - SQL repository
//! - `PostStore`, the validated entry point

mod page;
mod repository;
mod store;
mod types;

pub use page::{Direction, Page, PageRequest, Sort, SortField};
pub use repository::{PostCounter, PostFilter, PostRepository};
pub use store::PostStore;
pub use types::{NewPost, NewPostBuilder, Post, PostUpdate, FIXED, NOT_FIXED};
