//! Client-side state: stores, order workflow and session persistence

mod catalog;
mod context;
mod error;
mod inventory;
mod orders;
mod session;
mod shows;

pub use catalog::{CatalogState, CatalogStore, ListingMode, SERIES_PAGE_SIZE};
pub use context::AppContext;
pub use error::{StoreError, StoreResult};
pub use inventory::{InventoryState, InventoryStore, INVENTORY_PAGE_SIZE};
pub use orders::{OrderState, OrderStore, ORDERS_PAGE_SIZE};
pub use session::{SessionState, SessionStore};
pub use shows::{ShowState, ShowStore, SHOWS_PAGE_SIZE};

/// First human-readable message out of a validation result
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "invalid input".to_string())
}
