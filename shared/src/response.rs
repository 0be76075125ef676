//! API Response types
//!
//! The service wraps every payload in the same envelope:
//!
//! ```json
//! {
//!     "success": true,
//!     "message": "ok",
//!     "data": { ... }
//! }
//! ```
//!
//! `success` is the authoritative outcome flag; the HTTP status only
//! distinguishes transport-level failures.

use serde::{Deserialize, Serialize};

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Outcome flag (false = business-rule rejection, message explains why)
    pub success: bool,
    /// Human-readable message (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    /// Create a new pagination
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// True when a next page exists
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// True when a previous page exists
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Plain page/limit query parameters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_up() {
        let p = Pagination::new(1, 12, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert!(!p.has_prev());
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let resp: ApiResponse<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
        assert!(resp.data.is_none());
    }
}
