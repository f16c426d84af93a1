//! Sorting, page requests and paged result envelopes
//!
//! A search arrives as raw [`PageParams`] tokens, becomes a [`PageRequest`]
//! (normalizing the sort token into a [`SortDirection`]), is answered by a
//! store with a [`Page`], and leaves as a [`PagedResult`] of client-facing
//! items.

use crate::config::PagingConfig;
use crate::core::error::UnrecognizedSortDirection;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Normalize a raw sort token
    ///
    /// Tokens are trimmed and compared case-insensitively. `asc`/`ascending`
    /// and `desc`/`descending` are recognized; anything else is an error.
    pub fn of(token: &str) -> Result<Self, UnrecognizedSortDirection> {
        let normalized = token.trim();
        if normalized.eq_ignore_ascii_case("asc") || normalized.eq_ignore_ascii_case("ascending")
        {
            Ok(SortDirection::Ascending)
        } else if normalized.eq_ignore_ascii_case("desc")
            || normalized.eq_ignore_ascii_case("descending")
        {
            Ok(SortDirection::Descending)
        } else {
            Err(UnrecognizedSortDirection::new(token))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Adjust an ascending comparison to this direction
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = UnrecognizedSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl TryFrom<String> for SortDirection {
    type Error = UnrecognizedSortDirection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(&value)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw paging tokens as they arrive from a query string
///
/// # Example
/// ```text
/// GET /v1/user/find_all_like_user_name/jo?pageNo=1&pageSize=20&sortBy=mail&sortDir=desc
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Zero-based page index
    #[serde(default)]
    pub page_no: u32,

    /// Items per page; falls back to the configured default
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Field to order by; falls back to the configured default
    #[serde(default)]
    pub sort_by: Option<String>,

    /// Sort token, normalized with [`SortDirection::of`]
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

fn default_sort_dir() -> String {
    SortDirection::Ascending.as_str().to_string()
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page_no: 0,
            page_size: None,
            sort_by: None,
            sort_dir: default_sort_dir(),
        }
    }
}

impl PageParams {
    /// Resolve defaults and the sort token into a [`PageRequest`]
    ///
    /// The page size is clamped to `1..=max_page_size`.
    pub fn into_request(
        self,
        paging: &PagingConfig,
    ) -> Result<PageRequest, UnrecognizedSortDirection> {
        let direction = SortDirection::of(&self.sort_dir)?;
        let size = self
            .page_size
            .unwrap_or(paging.default_page_size)
            .clamp(1, paging.max_page_size.max(1));
        let sort_by = self
            .sort_by
            .filter(|field| !field.trim().is_empty())
            .unwrap_or_else(|| paging.default_sort_by.clone());

        Ok(PageRequest {
            page: self.page_no,
            size,
            sort_by,
            direction,
        })
    }
}

/// A resolved page query handed to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Items per page, at least 1
    pub size: u32,
    /// Field to order by
    pub sort_by: String,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            page,
            size: size.max(1),
            sort_by: sort_by.into(),
            direction,
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_mul(self.size as usize)
    }
}

/// The raw outcome of a paged query, as a store reports it
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total_elements: u64,
    pub total_pages: u32,
    pub number_of_elements: u32,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// Cut the requested page out of an already ordered collection
    pub fn paginate(items: Vec<T>, request: &PageRequest) -> Self {
        let total = items.len() as u64;
        let size = u64::from(request.size.max(1));
        let total_pages = u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX);
        let content: Vec<T> = items
            .into_iter()
            .skip(request.offset())
            .take(request.size as usize)
            .collect();

        Self {
            total_elements: total,
            total_pages,
            number_of_elements: count(&content),
            content,
        }
    }

    /// Order `items` with `compare` in the request's direction, then paginate
    pub fn paginate_by<F>(mut items: Vec<T>, request: &PageRequest, mut compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let direction = request.direction;
        items.sort_by(|a, b| direction.apply(compare(a, b)));
        Self::paginate(items, request)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Paged envelope returned to clients
///
/// Serializes as `{ totalElements, totalPages, numberOfElements, content }`.
/// `number_of_elements` always equals the length of `content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    total_elements: u64,
    total_pages: u32,
    number_of_elements: u32,
    content: Vec<T>,
}

impl<T> PagedResult<T> {
    /// Build an envelope around `content`; the element count is taken from it
    pub fn new(total_elements: u64, total_pages: u32, content: Vec<T>) -> Self {
        Self {
            total_elements,
            total_pages,
            number_of_elements: count(&content),
            content,
        }
    }

    /// Translate a store page into an envelope, mapping each item in order
    ///
    /// Totals are copied as reported; nothing is filtered, sorted or recounted
    /// except the current-page count, which follows the mapped content.
    pub fn from_page<S, F>(page: Page<S>, f: F) -> Self
    where
        F: FnMut(S) -> T,
    {
        let reported = page.number_of_elements;
        let content: Vec<T> = page.content.into_iter().map(f).collect();
        let result = Self::new(page.total_elements, page.total_pages, content);
        if result.number_of_elements != reported {
            tracing::warn!(
                reported,
                actual = result.number_of_elements,
                "store reported a page size that differs from its content"
            );
        }
        result
    }

    /// Map the content, keeping the totals
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult::new(
            self.total_elements,
            self.total_pages,
            self.content.into_iter().map(f).collect(),
        )
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn number_of_elements(&self) -> u32 {
        self.number_of_elements
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

fn count<T>(content: &[T]) -> u32 {
    u32::try_from(content.len()).unwrap_or(u32::MAX)
}
