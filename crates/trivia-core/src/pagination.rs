//! Page-based pagination.
//!
//! Listings are split into fixed pages of [`QUESTIONS_PER_PAGE`] items. The
//! page number is 1-indexed and read from the `page` query parameter; page
//! `P` covers the half-open range `[(P - 1) * 10, P * 10)` of the id-ordered
//! result set.
//!
//! Pages at or below zero have no window at all. Callers treat that as an
//! empty page rather than an error.
//!
//! # Example
//!
//! ```ignore
//! // GET /questions?page=3
//! let params = PageParams { page: Some(3) };
//! let window = params.window().unwrap();
//!
//! assert_eq!(window.offset, 20);
//! assert_eq!(window.limit, 10);
//! ```

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_lenient_i64;

/// Number of questions returned per page.
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Query parameters selecting a page.
///
/// A missing, empty, or non-numeric `page` falls back to page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: Some(1) }
    }
}

/// A `LIMIT`/`OFFSET` pair for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    pub fn new(page: i64) -> Self {
        Self { page: Some(page) }
    }

    /// Returns the requested page number, defaulting to 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Returns the window for the requested page, or `None` when the page
    /// number is zero or negative.
    #[must_use]
    pub fn window(&self) -> Option<PageWindow> {
        let page = self.page();
        if page < 1 {
            return None;
        }

        Some(PageWindow {
            limit: QUESTIONS_PER_PAGE,
            offset: (page - 1).saturating_mul(QUESTIONS_PER_PAGE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_page() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(
            params.window(),
            Some(PageWindow {
                limit: 10,
                offset: 0
            })
        );
    }

    #[test]
    fn test_missing_page_is_first_page() {
        let params = PageParams { page: None };
        assert_eq!(params.window().unwrap().offset, 0);
    }

    #[test]
    fn test_window_offsets() {
        for (page, offset) in [(1, 0), (2, 10), (3, 20), (100, 990)] {
            let window = PageParams::new(page).window().unwrap();
            assert_eq!(window.offset, offset);
            assert_eq!(window.limit, QUESTIONS_PER_PAGE);
        }
    }

    #[test]
    fn test_non_positive_pages_have_no_window() {
        assert_eq!(PageParams::new(0).window(), None);
        assert_eq!(PageParams::new(-3).window(), None);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let window = PageParams::new(i64::MAX).window().unwrap();
        assert_eq!(window.offset, i64::MAX);
    }

    #[test]
    fn test_deserialize_page_from_query_strings() {
        let params: PageParams = serde_json::from_str(r#"{"page":"4"}"#).unwrap();
        assert_eq!(params.page(), 4);

        let params: PageParams = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(params.page(), 1);

        let params: PageParams = serde_json::from_str(r#"{"page":""}"#).unwrap();
        assert_eq!(params.page(), 1);

        let params: PageParams = serde_json::from_str(r#"{"page":"two"}"#).unwrap();
        assert_eq!(params.page(), 1);
    }
}
