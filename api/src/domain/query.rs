//! Order query capability
//!
//! Describes *what* to fetch (`OrderSearch`) and *how much of the aggregate*
//! to fetch in the same round trip (`FetchShape`).

use crate::domain::entities::OrderStatus;
use crate::error::DomainError;

/// Default page window for paginated fetches
pub const DEFAULT_PAGE_OFFSET: i64 = 0;
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Largest page a caller may request; bigger limits are clamped
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Search predicate over orders. The default matches every order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    /// Substring of the member name
    pub member_name: Option<String>,
    pub order_status: Option<OrderStatus>,
}

impl OrderSearch {
    /// Member name filter, ignoring blank input
    pub fn member_name(&self) -> Option<&str> {
        self.member_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Offset/limit window over to-one joined rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    /// Validate a raw offset/limit pair.
    ///
    /// Negative values are rejected. A zero limit is a valid empty page and
    /// limits above [`MAX_PAGE_LIMIT`] are clamped.
    pub fn new(offset: i64, limit: i64) -> Result<Self, DomainError> {
        if offset < 0 {
            return Err(DomainError::Validation(format!(
                "offset must be non-negative, got {}",
                offset
            )));
        }
        if limit < 0 {
            return Err(DomainError::Validation(format!(
                "limit must be non-negative, got {}",
                limit
            )));
        }

        Ok(Self {
            offset: offset as u64,
            limit: (limit as u64).min(MAX_PAGE_LIMIT),
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: DEFAULT_PAGE_OFFSET as u64,
            limit: DEFAULT_PAGE_LIMIT as u64,
        }
    }
}

/// How much of the order aggregate a query loads in its single round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchShape {
    /// Orders only. Every association stays unloaded.
    Lazy,
    /// Orders joined with member and delivery. Line items stay unloaded.
    ToOne,
    /// Same as `ToOne`, windowed. Safe to paginate since no to-many join is made.
    ToOnePage(Page),
    /// Orders joined with member, delivery, line items and items.
    /// Rows are collapsed per order, so no pagination is offered.
    Full,
}

impl FetchShape {
    pub fn name(&self) -> &'static str {
        match self {
            FetchShape::Lazy => "lazy",
            FetchShape::ToOne => "to_one",
            FetchShape::ToOnePage(_) => "to_one_page",
            FetchShape::Full => "full",
        }
    }
}

/// A retrieval request against the order aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub search: OrderSearch,
    pub shape: FetchShape,
}

impl OrderQuery {
    pub fn new(search: OrderSearch, shape: FetchShape) -> Self {
        Self { search, shape }
    }

    pub fn lazy(search: OrderSearch) -> Self {
        Self::new(search, FetchShape::Lazy)
    }

    pub fn to_one(search: OrderSearch) -> Self {
        Self::new(search, FetchShape::ToOne)
    }

    pub fn to_one_page(search: OrderSearch, page: Page) -> Self {
        Self::new(search, FetchShape::ToOnePage(page))
    }

    pub fn full(search: OrderSearch) -> Self {
        Self::new(search, FetchShape::Full)
    }
}
