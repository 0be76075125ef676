//! HTTP transport for network-based API calls

use std::sync::RwLock;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// Error payload shape used by the service for non-2xx responses
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for making network requests to the PixelBox API.
///
/// The token is held behind a lock so the session layer can install or clear
/// it on a shared handle after login/logout.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.token.clone()),
        })
    }

    /// Get the server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a copy of the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Install or clear the bearer token
    pub fn set_token(&self, token: Option<&str>) {
        *self.token.write().expect("token lock poisoned") = token.map(str::to_string);
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|t| format!("Bearer {}", t))
    }

    async fn execute<T: DeserializeOwned>(&self, mut req: reqwest::RequestBuilder) -> ClientResult<T> {
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.client.get(self.url(path))).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: serde::Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.execute(self.client.get(self.url(path)).query(query)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.client.post(self.url(path))).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.client.put(self.url(path)).json(body)).await
    }

    /// Make a PUT request without body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.client.put(self.url(path))).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.client.delete(self.url(path))).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message);
            tracing::debug!(status = %status, "request rejected by server");
            return Err(Self::status_error(status, message, text));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    fn status_error(status: StatusCode, message: Option<String>, raw: String) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message.unwrap_or(raw)),
            StatusCode::NOT_FOUND => ClientError::NotFound(message.unwrap_or(raw)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message.unwrap_or(raw))
            }
            _ => ClientError::Api(
                message.unwrap_or_else(|| format!("request failed with status {}", status)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            HttpClient::status_error(StatusCode::UNAUTHORIZED, None, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::NOT_FOUND, Some("no such order".into()), String::new()),
            ClientError::NotFound(msg) if msg == "no such order"
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::BAD_REQUEST, Some("quantity too small".into()), String::new()),
            ClientError::Validation(msg) if msg == "quantity too small"
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::INTERNAL_SERVER_ERROR, None, "boom".into()),
            ClientError::Api(_)
        ));
    }

    #[test]
    fn token_roundtrip() {
        let client = HttpClient::new(&ClientConfig::default()).unwrap();
        assert!(client.token().is_none());
        client.set_token(Some("abc"));
        assert_eq!(client.token().as_deref(), Some("abc"));
        client.set_token(None);
        assert!(client.token().is_none());
    }
}
