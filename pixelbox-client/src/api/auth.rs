//! Auth endpoints

use async_trait::async_trait;
use shared::{ApiResponse, LoginData, LoginRequest, RegisterRequest, TokenData};

use super::expect_success;
use crate::{ClientError, ClientResult, HttpClient};

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Login with username and password
    async fn login(&self, req: &LoginRequest) -> ClientResult<LoginData>;

    /// Register a new account. Does not authenticate.
    async fn register(&self, req: &RegisterRequest) -> ClientResult<()>;

    /// Notify the server of a logout
    async fn logout(&self) -> ClientResult<()>;

    /// Exchange the current token for a fresh one
    async fn refresh_token(&self) -> ClientResult<TokenData>;

    /// Install or clear the bearer token used by subsequent requests
    fn set_token(&self, token: Option<&str>);
}

#[async_trait]
impl AuthApi for HttpClient {
    async fn login(&self, req: &LoginRequest) -> ClientResult<LoginData> {
        let resp: ApiResponse<LoginData> = self.post("api/auth/login", req).await?;
        if !resp.success {
            return Err(ClientError::Auth(
                resp.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }
        resp.data
            .ok_or_else(|| ClientError::InvalidResponse("missing login data".to_string()))
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> = self.post("api/auth/register", req).await?;
        expect_success(resp, "register")
    }

    async fn logout(&self) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> = self.post_empty("api/auth/logout").await?;
        expect_success(resp, "logout")
    }

    async fn refresh_token(&self) -> ClientResult<TokenData> {
        let resp: ApiResponse<TokenData> = self.post_empty("api/auth/refresh").await?;
        if !resp.success {
            return Err(ClientError::Auth(
                resp.message.unwrap_or_else(|| "Token refresh failed".to_string()),
            ));
        }
        resp.data
            .ok_or_else(|| ClientError::InvalidResponse("missing token data".to_string()))
    }

    fn set_token(&self, token: Option<&str>) {
        HttpClient::set_token(self, token);
    }
}
