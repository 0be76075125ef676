//! PixelBox Client - HTTP client for the PixelBox API
//!
//! Wraps outbound REST calls, injects bearer-token auth and normalizes the
//! `{success, message, data}` envelope into typed results. Endpoints are
//! grouped into per-domain traits so callers can depend on exactly the
//! surface they use (and tests can substitute mocks).

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{Api, AuthApi, CatalogApi, InventoryApi, OrderApi, ShowApi, UserApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{ApiResponse, Pagination};
