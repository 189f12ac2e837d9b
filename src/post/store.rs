//! Post store for postboard.
//!
//! `PostStore` is the entry point for post storage and retrieval. It
//! validates input, turns missing rows into `NotFound` where an operation
//! needs an existing post, caps page sizes, and delegates SQL to
//! [`PostRepository`].
//!
//! Text search is substring containment and is case sensitive; `%` and `_`
//! in a keyword match themselves.

use tracing::{debug, info};

use super::page::{Page, PageRequest, Sort, SortField};
use super::repository::{PostCounter, PostFilter, PostRepository};
use super::types::{NewPost, Post, PostUpdate, FIXED, NOT_FIXED};
use crate::config::PagingConfig;
use crate::db::Database;
use crate::{BoardError, Result};

/// High-level post operations.
pub struct PostStore<'a> {
    db: &'a Database,
    paging: PagingConfig,
}

impl<'a> PostStore<'a> {
    /// Create a store with default paging limits.
    pub fn new(db: &'a Database) -> Self {
        Self::with_paging(db, PagingConfig::default())
    }

    /// Create a store with the given paging limits.
    pub fn with_paging(db: &'a Database, paging: PagingConfig) -> Self {
        Self { db, paging }
    }

    fn repo(&self) -> PostRepository<'_> {
        PostRepository::new(self.db.pool())
    }

    /// First page at the configured default size, insertion order.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::of(0, self.paging.default_page_size)
    }

    /// Create a post.
    ///
    /// Returns the stored post with its assigned ID and timestamps.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        new_post.validate()?;

        let post = self.repo().create(new_post).await?;
        info!(
            post_id = post.id,
            board_id = post.board_id,
            user_id = post.user_id,
            "post created"
        );
        Ok(post)
    }

    /// Get a post by ID. A miss is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        debug!(post_id = id, "find post by id");
        self.repo().get_by_id(id).await
    }

    /// Get a post by ID, failing with `NotFound` on a miss.
    pub async fn get(&self, id: i64) -> Result<Post> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {id}")))
    }

    /// List every post in insertion order.
    pub async fn find_all(&self) -> Result<Vec<Post>> {
        self.repo().list_all().await
    }

    /// List all posts, one page at a time.
    pub async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<Post>> {
        self.page(PostFilter::All, request, request.sort).await
    }

    /// List the posts of one board.
    pub async fn find_by_board_id(&self, board_id: i64, request: &PageRequest) -> Result<Page<Post>> {
        self.page(PostFilter::Board(board_id), request, request.sort)
            .await
    }

    /// List the posts of one author.
    pub async fn find_by_user_id(&self, user_id: i64, request: &PageRequest) -> Result<Page<Post>> {
        self.page(PostFilter::User(user_id), request, request.sort)
            .await
    }

    /// Posts whose title contains `keyword`.
    pub async fn search_by_title(&self, keyword: &str, request: &PageRequest) -> Result<Page<Post>> {
        let keyword = require_keyword(keyword)?;
        self.page(PostFilter::Title(keyword), request, request.sort)
            .await
    }

    /// Posts whose content contains `keyword`.
    pub async fn search_by_content(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Post>> {
        let keyword = require_keyword(keyword)?;
        self.page(PostFilter::Content(keyword), request, request.sort)
            .await
    }

    /// Posts whose title or content contains `keyword`, each returned once.
    pub async fn search_by_title_or_content(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Post>> {
        let keyword = require_keyword(keyword)?;
        self.page(PostFilter::TitleOrContent(keyword), request, request.sort)
            .await
    }

    /// Most viewed posts first; ties go to the newer post.
    ///
    /// The request's own sort is ignored.
    pub async fn find_top_by_view_count(&self, request: &PageRequest) -> Result<Page<Post>> {
        let sort = Sort::by(SortField::ViewCount).descending();
        self.page(PostFilter::All, request, sort).await
    }

    /// Persist the title and content of an existing post.
    ///
    /// Every other field of `post` is ignored.
    pub async fn update(&self, post: &Post) -> Result<Post> {
        self.update_by_id(post.id, &PostUpdate::from(post)).await
    }

    /// Apply a partial update to an existing post.
    pub async fn update_by_id(&self, id: i64, update: &PostUpdate) -> Result<Post> {
        update.validate()?;

        let post = self
            .repo()
            .update(id, update)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {id}")))?;
        info!(post_id = id, "post updated");
        Ok(post)
    }

    /// Delete a fetched post. A post that is already gone is a no-op.
    pub async fn delete(&self, post: &Post) -> Result<()> {
        self.delete_by_id(post.id).await?;
        Ok(())
    }

    /// Delete a post by ID. A missing ID is a no-op.
    ///
    /// Returns whether a post was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let deleted = self.repo().delete(id).await?;
        if deleted {
            info!(post_id = id, "post deleted");
        } else {
            debug!(post_id = id, "delete skipped, post not found");
        }
        Ok(deleted)
    }

    /// Current number of posts.
    pub async fn count(&self) -> Result<i64> {
        self.repo().count(&PostFilter::All).await
    }

    /// Current number of posts in one board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        self.repo().count(&PostFilter::Board(board_id)).await
    }

    /// Record a view. Concurrent calls are never lost.
    pub async fn increment_view_count(&self, id: i64) -> Result<Post> {
        self.repo()
            .increment_view_count(id)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {id}")))
    }

    /// Add `delta` to the like count, stopping at zero.
    pub async fn adjust_likes_count(&self, id: i64, delta: i64) -> Result<Post> {
        self.adjust(id, PostCounter::Likes, delta).await
    }

    /// Add `delta` to the comment count, stopping at zero.
    pub async fn adjust_comments_count(&self, id: i64, delta: i64) -> Result<Post> {
        self.adjust(id, PostCounter::Comments, delta).await
    }

    /// Pin or unpin a post.
    pub async fn set_fixed(&self, id: i64, fixed: bool) -> Result<Post> {
        let flag = if fixed { FIXED } else { NOT_FIXED };
        let post = self
            .repo()
            .set_fixed(id, flag)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {id}")))?;
        info!(post_id = id, fixed, "post pin flag changed");
        Ok(post)
    }

    async fn adjust(&self, id: i64, counter: PostCounter, delta: i64) -> Result<Post> {
        self.repo()
            .adjust_counter(id, counter, delta)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {id}")))
    }

    async fn page(&self, filter: PostFilter, request: &PageRequest, sort: Sort) -> Result<Page<Post>> {
        request.validate()?;
        let request = PageRequest {
            size: request.size.min(self.paging.max_page_size),
            sort,
            ..*request
        };

        let repo = self.repo();
        let total = repo.count(&filter).await?;
        let content = if request.offset() < total {
            repo.list_paged(&filter, &request.sort, request.offset(), i64::from(request.size))
                .await?
        } else {
            Vec::new()
        };

        debug!(
            ?filter,
            page = request.number,
            size = request.size,
            total,
            "post page loaded"
        );
        Ok(Page::new(content, total.max(0) as u64, &request))
    }
}

fn require_keyword(keyword: &str) -> Result<String> {
    if keyword.is_empty() {
        return Err(BoardError::Validation(
            "search keyword must not be empty".to_string(),
        ));
    }
    Ok(keyword.to_string())
}
