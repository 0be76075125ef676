//! Typed endpoint traits
//!
//! Each domain gets its own trait implemented for [`HttpClient`]. Stores
//! depend on the narrow trait they call; [`Api`] bundles them for wiring.

mod auth;
mod catalog;
mod inventory;
mod orders;
mod shows;
mod users;

pub use auth::AuthApi;
pub use catalog::CatalogApi;
pub use inventory::InventoryApi;
pub use orders::OrderApi;
pub use shows::ShowApi;
pub use users::UserApi;

use shared::ApiResponse;

use crate::{ClientError, ClientResult};

/// The full API surface
pub trait Api: AuthApi + CatalogApi + OrderApi + InventoryApi + UserApi + ShowApi {}

impl<T> Api for T where T: AuthApi + CatalogApi + OrderApi + InventoryApi + UserApi + ShowApi {}

/// Unwrap an envelope that must carry data
pub(crate) fn expect_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    if !resp.success {
        return Err(ClientError::Api(
            resp.message.unwrap_or_else(|| format!("{what} request failed")),
        ));
    }
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse(format!("missing {what} data")))
}

/// Check an envelope's outcome, discarding any data
pub(crate) fn expect_success<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<()> {
    if !resp.success {
        return Err(ClientError::Api(
            resp.message.unwrap_or_else(|| format!("{what} request failed")),
        ));
    }
    Ok(())
}

/// Unwrap an envelope whose data may legitimately be absent
pub(crate) fn data_or_default<T: Default>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    if !resp.success {
        return Err(ClientError::Api(
            resp.message.unwrap_or_else(|| format!("{what} request failed")),
        ));
    }
    Ok(resp.data.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_data_unwraps_success() {
        let resp = ApiResponse::ok(7u32);
        assert_eq!(expect_data(resp, "number").unwrap(), 7);
    }

    #[test]
    fn expect_data_surfaces_server_message() {
        let resp: ApiResponse<u32> = ApiResponse::error("balance too low");
        let err = expect_data(resp, "order").unwrap_err();
        assert_eq!(err.server_message(), Some("balance too low"));
    }

    #[test]
    fn expect_data_rejects_missing_payload() {
        let resp: ApiResponse<u32> = ApiResponse {
            success: true,
            message: None,
            data: None,
        };
        assert!(matches!(
            expect_data(resp, "order"),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn data_or_default_tolerates_missing_payload() {
        let resp: ApiResponse<Vec<u32>> = ApiResponse {
            success: true,
            message: None,
            data: None,
        };
        assert_eq!(data_or_default(resp, "items").unwrap(), Vec::<u32>::new());
    }
}
