//! InventoryStore - owned items, rarity stats and the two toggles
//!
//! Rarity stats are folded from the loaded page, so they are scoped to the
//! current view rather than the whole collection. Toggles flip local state
//! only after the server acknowledges, with an explicit per-entry in-flight
//! guard so a rapid double-invocation cannot desync local and server state.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pixelbox_client::{Api, InventoryApi};
use shared::{InventoryEntry, InventoryFilter, Pagination, RarityStats};

use super::{StoreError, StoreResult};

/// Default inventory page size
pub const INVENTORY_PAGE_SIZE: u32 = 20;

/// Inventory state snapshot
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    pub entries: Vec<InventoryEntry>,
    pub pagination: Pagination,
    pub stats: RarityStats,
    pub filter: InventoryFilter,
    pub loading: bool,
    busy: HashSet<String>,
}

impl InventoryState {
    /// True while a toggle for this entry is outstanding
    pub fn is_busy(&self, entry_id: &str) -> bool {
        self.busy.contains(entry_id)
    }
}

/// Inventory store
pub struct InventoryStore {
    api: Arc<dyn Api>,
    state: Mutex<InventoryState>,
}

impl InventoryStore {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            state: Mutex::new(InventoryState::default()),
        }
    }

    /// Snapshot for rendering
    pub fn state(&self) -> InventoryState {
        self.state.lock().expect("inventory lock poisoned").clone()
    }

    fn set_loading(&self, loading: bool) {
        self.state.lock().expect("inventory lock poisoned").loading = loading;
    }

    /// Fetch a page of inventory and recompute the rarity stats from it
    pub async fn fetch_inventory(&self, filter: InventoryFilter) -> StoreResult<()> {
        let query = InventoryFilter {
            limit: filter.limit.or(Some(INVENTORY_PAGE_SIZE)),
            ..filter
        };

        self.set_loading(true);
        let result = self.api.list_inventory(&query).await;
        self.set_loading(false);

        let list = result?;
        let stats = RarityStats::tally(&list.items);
        tracing::debug!(count = list.items.len(), total = stats.total, "inventory page loaded");

        let mut state = self.state.lock().expect("inventory lock poisoned");
        state.entries = list.items;
        state.pagination = list.pagination;
        state.stats = stats;
        state.filter = query;
        Ok(())
    }

    /// Flip an entry's favorite flag. Local state changes only after the
    /// server acknowledges; a second call while one is in flight is rejected.
    pub async fn toggle_favorite(&self, entry_id: &str) -> StoreResult<()> {
        let target = self.begin_toggle(entry_id, |e| e.is_favorite)?;
        let result = self.api.set_favorite(entry_id, target).await;
        self.finish_toggle(entry_id, result.is_ok(), |e| e.is_favorite = target);
        result?;
        tracing::debug!(entry_id, is_favorite = target, "favorite toggled");
        Ok(())
    }

    /// Flip an entry's display flag, same protocol as favorites
    pub async fn toggle_display(&self, entry_id: &str) -> StoreResult<()> {
        let target = self.begin_toggle(entry_id, |e| e.is_displayed)?;
        let result = self.api.set_display(entry_id, target).await;
        self.finish_toggle(entry_id, result.is_ok(), |e| e.is_displayed = target);
        result?;
        tracing::debug!(entry_id, is_displayed = target, "display toggled");
        Ok(())
    }

    /// Mark the entry busy and compute the inverse of its current flag
    fn begin_toggle(
        &self,
        entry_id: &str,
        flag: impl Fn(&InventoryEntry) -> bool,
    ) -> StoreResult<bool> {
        let mut state = self.state.lock().expect("inventory lock poisoned");
        if state.busy.contains(entry_id) {
            return Err(StoreError::Busy(entry_id.to_string()));
        }
        let entry = state
            .entries
            .iter()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| StoreError::Validation("unknown inventory entry".to_string()))?;
        let target = !flag(entry);
        state.busy.insert(entry_id.to_string());
        Ok(target)
    }

    /// Release the busy mark and, on acknowledgment, apply the flip locally
    fn finish_toggle(&self, entry_id: &str, acknowledged: bool, apply: impl FnOnce(&mut InventoryEntry)) {
        let mut state = self.state.lock().expect("inventory lock poisoned");
        state.busy.remove(entry_id);
        if acknowledged {
            if let Some(entry) = state.entries.iter_mut().find(|e| e.id == entry_id) {
                apply(entry);
            }
        }
    }
}
