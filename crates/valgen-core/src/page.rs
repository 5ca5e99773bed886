//! Pagination arithmetic and the paged response envelope.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Page size used when the caller does not supply `limit`.
pub const DEFAULT_PAGE_SIZE: u64 = 30;

/// A zero-based page index and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub pagination_counter: u64,
  pub limit:              u64,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { pagination_counter: 0, limit: DEFAULT_PAGE_SIZE }
  }
}

impl PageRequest {
  /// Validate raw request values. A negative index and a non-positive page
  /// size are rejected.
  pub fn new(pagination_counter: i64, limit: i64) -> Result<Self> {
    if pagination_counter < 0 {
      return Err(Error::NegativePageIndex(pagination_counter));
    }
    if limit <= 0 {
      return Err(Error::NonPositiveLimit(limit));
    }
    Ok(Self {
      pagination_counter: pagination_counter as u64,
      limit:              limit as u64,
    })
  }

  /// Number of fact rows skipped before this page.
  pub fn offset(&self) -> u64 {
    self.pagination_counter.saturating_mul(self.limit)
  }

  /// One-based page number, for display.
  pub fn page(&self) -> u64 { self.pagination_counter.saturating_add(1) }

  pub fn is_first(&self) -> bool { self.pagination_counter == 0 }
}

/// Pagination metadata returned alongside every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
  pub is_first_page: bool,
  pub is_last_page:  bool,
  pub page:          u64,
  pub page_size:     u64,
  pub total_rows:    u64,
}

impl PageInfo {
  /// Derive metadata from the request, the number of rows actually returned
  /// for this page, and the total number of matching fact rows.
  pub fn derive(request: PageRequest, returned: usize, total_rows: u64) -> Self {
    Self {
      is_first_page: request.is_first(),
      is_last_page:  request.offset().saturating_add(returned as u64)
        >= total_rows,
      page:          request.page(),
      page_size:     request.limit,
      total_rows,
    }
  }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub data:      Vec<T>,
  pub page_info: PageInfo,
}
