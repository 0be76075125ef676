//! Application context
//!
//! Owns every store and is passed explicitly to whatever needs state; the
//! workflow never reaches for a global.

use std::path::Path;
use std::sync::Arc;

use pixelbox_client::Api;

use super::{CatalogStore, InventoryStore, OrderStore, SessionStore, ShowStore, StoreResult};

/// Shared application context
pub struct AppContext {
    pub session: SessionStore,
    pub catalog: CatalogStore,
    pub inventory: InventoryStore,
    pub orders: OrderStore,
    pub shows: ShowStore,
}

impl AppContext {
    /// Wire every store to the same API handle and restore the persisted
    /// session from `data_dir`.
    pub fn new(api: Arc<dyn Api>, data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            session: SessionStore::load(api.clone(), data_dir)?,
            catalog: CatalogStore::new(api.clone()),
            inventory: InventoryStore::new(api.clone()),
            orders: OrderStore::new(api.clone()),
            shows: ShowStore::new(api),
        })
    }
}
