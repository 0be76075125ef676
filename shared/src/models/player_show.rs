//! Player show (social feed) models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::series::Item;
use crate::models::user::UserSummary;
use crate::response::Pagination;

/// Maximum length of a show's free-text content
pub const MAX_SHOW_CONTENT_LEN: usize = 500;

/// A social post showcasing an owned item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerShow {
    pub id: String,
    pub user: UserSummary,
    pub content: String,
    /// The showcased item, resolved from the attached inventory entry
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default)]
    pub likes_count: u32,
    /// Whether the requesting viewer has liked this show
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Paginated feed payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowList {
    pub shows: Vec<PlayerShow>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Feed query parameters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShowQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Sort expression, e.g. `createdAt:desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl ShowQuery {
    /// Newest-first page, the feed's default ordering
    pub fn latest(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            sort: Some("createdAt:desc".to_string()),
        }
    }
}

/// Show creation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowRequest {
    #[validate(length(min = 1, max = 500, message = "content must be 1-500 characters"))]
    pub content: String,
    /// Inventory entry being showcased
    pub inventory_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_rules() {
        let ok = CreateShowRequest {
            content: "pulled a legendary on my first draw".to_string(),
            inventory_id: "inv-1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateShowRequest {
            content: String::new(),
            inventory_id: "inv-1".to_string(),
        };
        assert!(empty.validate().is_err());

        let long = CreateShowRequest {
            content: "x".repeat(MAX_SHOW_CONTENT_LEN + 1),
            inventory_id: "inv-1".to_string(),
        };
        assert!(long.validate().is_err());
    }
}
