//! Inventory endpoints

use async_trait::async_trait;
use shared::{ApiResponse, InventoryFilter, InventoryList};

use super::{expect_data, expect_success};
use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Paginated inventory listing with optional rarity/favorite filters
    async fn list_inventory(&self, filter: &InventoryFilter) -> ClientResult<InventoryList>;

    /// Set an entry's favorite flag
    async fn set_favorite(&self, entry_id: &str, is_favorite: bool) -> ClientResult<()>;

    /// Set an entry's display flag
    async fn set_display(&self, entry_id: &str, is_displayed: bool) -> ClientResult<()>;
}

#[async_trait]
impl InventoryApi for HttpClient {
    async fn list_inventory(&self, filter: &InventoryFilter) -> ClientResult<InventoryList> {
        let resp: ApiResponse<InventoryList> = self.get_query("api/inventory", filter).await?;
        expect_data(resp, "inventory")
    }

    async fn set_favorite(&self, entry_id: &str, is_favorite: bool) -> ClientResult<()> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            is_favorite: bool,
        }
        let resp: ApiResponse<serde_json::Value> = self
            .put(&format!("api/inventory/{entry_id}/favorite"), &Body { is_favorite })
            .await?;
        expect_success(resp, "favorite toggle")
    }

    async fn set_display(&self, entry_id: &str, is_displayed: bool) -> ClientResult<()> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            is_displayed: bool,
        }
        let resp: ApiResponse<serde_json::Value> = self
            .put(&format!("api/inventory/{entry_id}/display"), &Body { is_displayed })
            .await?;
        expect_success(resp, "display toggle")
    }
}
