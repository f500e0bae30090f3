//! Pagination defaults shared by list endpoints
//!
//! Mirrors the query-parameter contract of the HTTP layer: `page` and
//! `limit` are optional, `sort_by` is validated by each service against its
//! own column whitelist, and `sort_order` only honors `asc` explicitly.

use serde::Deserialize;

/// Default page when the client sends none.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size: one calendar month of daily records.
pub const DEFAULT_LIMIT: u64 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `"asc"` (case-insensitive) sorts ascending; anything else,
    /// including an absent value, sorts descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// Raw pagination options as they arrive from the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageOptions {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Resolved pagination parameters with defaults substituted and the skip
/// offset computed.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub skip: u64,
    pub sort_by: Option<String>,
    pub sort_order: SortDirection,
}

impl Pagination {
    pub fn from_options(options: PageOptions) -> Self {
        let page = match options.page {
            Some(page) if page >= 1 => page,
            _ => DEFAULT_PAGE,
        };
        let limit = match options.limit {
            Some(limit) if limit >= 1 => limit,
            _ => DEFAULT_LIMIT,
        };

        Pagination {
            page,
            limit,
            // page and limit are client-controlled; saturate instead of
            // overflowing on absurd values.
            skip: page.saturating_sub(1).saturating_mul(limit),
            sort_by: options.sort_by,
            sort_order: SortDirection::parse(options.sort_order.as_deref()),
        }
    }
}
