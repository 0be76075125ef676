//! Series catalog endpoints

use async_trait::async_trait;
use shared::{ApiResponse, Series, SeriesList, SeriesQuery};

use super::expect_data;
use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Paginated series listing
    async fn list_series(&self, query: &SeriesQuery) -> ClientResult<SeriesList>;

    /// Keyword search over series
    async fn search_series(&self, query: &SeriesQuery) -> ClientResult<SeriesList>;

    /// Most popular series, by draw volume
    async fn popular_series(&self, limit: u32) -> ClientResult<SeriesList>;

    /// Single series with its item breakdown
    async fn series_detail(&self, id: &str) -> ClientResult<Series>;
}

#[async_trait]
impl CatalogApi for HttpClient {
    async fn list_series(&self, query: &SeriesQuery) -> ClientResult<SeriesList> {
        let resp: ApiResponse<SeriesList> = self.get_query("api/series", query).await?;
        expect_data(resp, "series list")
    }

    async fn search_series(&self, query: &SeriesQuery) -> ClientResult<SeriesList> {
        let resp: ApiResponse<SeriesList> = self.get_query("api/series/search", query).await?;
        expect_data(resp, "series search")
    }

    async fn popular_series(&self, limit: u32) -> ClientResult<SeriesList> {
        #[derive(serde::Serialize)]
        struct PopularQuery {
            limit: u32,
        }
        let resp: ApiResponse<SeriesList> = self
            .get_query("api/series/popular", &PopularQuery { limit })
            .await?;
        expect_data(resp, "popular series")
    }

    async fn series_detail(&self, id: &str) -> ClientResult<Series> {
        let resp: ApiResponse<Series> = self.get(&format!("api/series/{id}")).await?;
        expect_data(resp, "series detail")
    }
}
