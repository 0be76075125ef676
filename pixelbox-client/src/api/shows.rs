//! Player show (social feed) endpoints

use async_trait::async_trait;
use shared::{ApiResponse, CreateShowRequest, PlayerShow, ShowList, ShowQuery};

use super::{expect_data, expect_success};
use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait ShowApi: Send + Sync {
    /// Paginated feed
    async fn list_shows(&self, query: &ShowQuery) -> ClientResult<ShowList>;

    /// Publish a show for an owned inventory entry
    async fn create_show(&self, req: &CreateShowRequest) -> ClientResult<PlayerShow>;

    /// Like or unlike, depending on the viewer's current state
    async fn toggle_like(&self, id: &str) -> ClientResult<()>;

    /// Delete one's own show
    async fn delete_show(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl ShowApi for HttpClient {
    async fn list_shows(&self, query: &ShowQuery) -> ClientResult<ShowList> {
        let resp: ApiResponse<ShowList> = self.get_query("api/player-shows", query).await?;
        expect_data(resp, "show list")
    }

    async fn create_show(&self, req: &CreateShowRequest) -> ClientResult<PlayerShow> {
        let resp: ApiResponse<PlayerShow> = self.post("api/player-shows", req).await?;
        expect_data(resp, "show creation")
    }

    async fn toggle_like(&self, id: &str) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> =
            self.post_empty(&format!("api/player-shows/{id}/like")).await?;
        expect_success(resp, "like toggle")
    }

    async fn delete_show(&self, id: &str) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> =
            self.delete(&format!("api/player-shows/{id}")).await?;
        expect_success(resp, "show deletion")
    }
}
