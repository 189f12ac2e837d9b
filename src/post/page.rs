//! Paging and sorting for post queries.

use serde::Serialize;

use crate::{BoardError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Columns a post listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Insertion order.
    #[default]
    Id,
    CreatedAt,
    UpdatedAt,
    ViewCount,
    LikesCount,
    CommentsCount,
}

impl SortField {
    /// Column name in the `posts` table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::ViewCount => "view_count",
            SortField::LikesCount => "likes_count",
            SortField::CommentsCount => "comments_count",
        }
    }
}

/// Ordering for a listing. The default is insertion order (`id ASC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    /// Sort by the given field, ascending.
    pub fn by(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn ascending(mut self) -> Self {
        self.direction = Direction::Asc;
        self
    }

    pub fn descending(mut self) -> Self {
        self.direction = Direction::Desc;
        self
    }

    /// Render as an `ORDER BY` list.
    ///
    /// `id` is appended as a tie-breaker so equal keys come back in the
    /// same order on every call.
    pub fn to_sql(&self) -> String {
        let dir = self.direction.as_sql();
        match self.field {
            SortField::Id => format!("id {dir}"),
            field => format!("{} {dir}, id {dir}", field.column()),
        }
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub number: u32,
    /// Maximum number of items on the page.
    pub size: u32,
    /// Ordering of the whole result set.
    pub sort: Sort,
}

impl PageRequest {
    /// Request page `number` holding up to `size` items, in insertion order.
    pub fn of(number: u32, size: u32) -> Self {
        Self {
            number,
            size,
            sort: Sort::default(),
        }
    }

    /// Replace the ordering.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Number of rows to skip, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        i64::from(self.number).saturating_mul(i64::from(self.size))
    }

    /// Reject requests that cannot produce a page.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(BoardError::Validation(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A slice of a larger ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page (at most `size`).
    pub content: Vec<T>,
    /// Number of matching items across all pages.
    pub total_elements: u64,
    /// `ceil(total_elements / size)`.
    pub total_pages: u64,
    /// Zero-based page number that was requested.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    /// Build a page from its content and the total match count.
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(request.size))
        };
        Self {
            content,
            total_elements,
            total_pages,
            number: request.number,
            size: request.size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check if a later page has content.
    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Transform the content, keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}
