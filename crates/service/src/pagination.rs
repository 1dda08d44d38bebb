//! Page requests for list endpoints.
//!
//! Clients address pages 1-based; the store pages 0-based.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_INDEX: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Zero-based page index plus page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Convert a 1-based page index into a page request.
    pub fn from_one_based(page_index: i64, page_size: i64) -> Result<Self, ServiceError> {
        if page_index < 1 {
            return Err(ServiceError::Validation(format!("pageIndex must be >= 1, got {page_index}")));
        }
        if page_size < 1 {
            return Err(ServiceError::Validation(format!("pageSize must be >= 1, got {page_size}")));
        }
        // the last row of the page must still be addressable as a signed 64-bit offset
        let end = (page_index - 1)
            .checked_mul(page_size)
            .and_then(|offset| offset.checked_add(page_size));
        if end.is_none() {
            return Err(ServiceError::Validation(format!(
                "page {page_index} of size {page_size} is out of range"
            )));
        }
        Ok(Self { page_index: (page_index - 1) as u64, page_size: page_size as u64 })
    }

    /// Fill whichever half of the pair is missing; `None` when neither is given.
    pub fn from_query(page_index: Option<i64>, page_size: Option<i64>) -> Result<Option<Self>, ServiceError> {
        match (page_index, page_size) {
            (None, None) => Ok(None),
            (index, size) => Self::from_one_based(
                index.unwrap_or(DEFAULT_PAGE_INDEX),
                size.unwrap_or(DEFAULT_PAGE_SIZE),
            )
            .map(Some),
        }
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        self.page_index.saturating_mul(self.page_size)
    }
}
