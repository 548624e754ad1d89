//! # Paging & Sorting
//!
//! Query results can be requested as a [`Page`]: the actor filters, sorts with the entity's
//! [`compare_by`](crate::ActorEntity::compare_by) and slices. Sorting is stable, so entities
//! that compare equal keep the store's default order (ascending id).

use crate::error::FrameworkError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Parses `"ASC"`/`"DESC"` case-insensitively. Anything that is not `DESC` sorts ascending.
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }
}

/// A request for one page of results, sorted by an entity-specific field.
#[derive(Debug, Clone)]
pub struct PageRequest<S> {
    /// Zero-based page index.
    pub page: usize,
    /// Page size, must be at least 1.
    pub size: usize,
    pub sort_by: S,
    pub direction: Direction,
}

impl<S> PageRequest<S> {
    pub fn new(page: usize, size: usize, sort_by: S, direction: Direction) -> Self {
        Self {
            page,
            size,
            sort_by,
            direction,
        }
    }

    pub fn validate(&self) -> Result<(), FrameworkError> {
        if self.size == 0 {
            return Err(FrameworkError::InvalidPage(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slices an already filtered and sorted result set.
    pub fn from_sorted<S>(items: Vec<T>, request: &PageRequest<S>) -> Self {
        let total_elements = items.len();
        let total_pages = total_elements.div_ceil(request.size.max(1));
        let content = items
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Converts the content while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn is_last(&self) -> bool {
        self.page + 1 >= self.total_pages
    }
}
