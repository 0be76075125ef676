//! Client configuration

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration for connecting to the PixelBox API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:7001")
    pub base_url: String,

    /// Bearer token for authenticated requests
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:7001")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:7001");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.token.is_none());

        let config = ClientConfig::new("https://api.example.com")
            .with_token("tok")
            .with_timeout(5);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.token.as_deref(), Some("tok"));
    }
}
