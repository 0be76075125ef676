//! User profile endpoints

use async_trait::async_trait;
use shared::{ApiResponse, PageQuery, PointsHistory, UpdateProfileRequest, User};

use super::expect_data;
use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait UserApi: Send + Sync {
    /// Authoritative profile record. Supersedes any optimistic balance math.
    async fn profile(&self) -> ClientResult<User>;

    /// Update profile fields, returning the merged record
    async fn update_profile(&self, req: &UpdateProfileRequest) -> ClientResult<User>;

    /// Paginated points ledger
    async fn points_history(&self, query: &PageQuery) -> ClientResult<PointsHistory>;
}

#[async_trait]
impl UserApi for HttpClient {
    async fn profile(&self) -> ClientResult<User> {
        let resp: ApiResponse<User> = self.get("api/users/profile").await?;
        expect_data(resp, "profile")
    }

    async fn update_profile(&self, req: &UpdateProfileRequest) -> ClientResult<User> {
        let resp: ApiResponse<User> = self.put("api/users/profile", req).await?;
        expect_data(resp, "profile update")
    }

    async fn points_history(&self, query: &PageQuery) -> ClientResult<PointsHistory> {
        let resp: ApiResponse<PointsHistory> = self.get_query("api/users/points", query).await?;
        expect_data(resp, "points history")
    }
}
