//! ShowStore - the player show social feed

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pixelbox_client::{Api, ShowApi};
use shared::{CreateShowRequest, Pagination, PlayerShow, ShowQuery};
use validator::Validate;

use super::{validation_message, StoreError, StoreResult};

/// Default feed page size
pub const SHOWS_PAGE_SIZE: u32 = 10;

/// Feed state snapshot
#[derive(Debug, Clone, Default)]
pub struct ShowState {
    pub shows: Vec<PlayerShow>,
    pub pagination: Pagination,
    pub loading: bool,
    busy: HashSet<String>,
}

impl ShowState {
    pub fn is_busy(&self, show_id: &str) -> bool {
        self.busy.contains(show_id)
    }
}

/// Player show store
pub struct ShowStore {
    api: Arc<dyn Api>,
    state: Mutex<ShowState>,
}

impl ShowStore {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            state: Mutex::new(ShowState::default()),
        }
    }

    /// Snapshot for rendering
    pub fn state(&self) -> ShowState {
        self.state.lock().expect("shows lock poisoned").clone()
    }

    fn set_loading(&self, loading: bool) {
        self.state.lock().expect("shows lock poisoned").loading = loading;
    }

    /// Fetch one newest-first page of the feed
    pub async fn fetch_shows(&self, page: u32) -> StoreResult<()> {
        let query = ShowQuery::latest(page, SHOWS_PAGE_SIZE);

        self.set_loading(true);
        let result = self.api.list_shows(&query).await;
        self.set_loading(false);

        let list = result?;
        tracing::debug!(count = list.shows.len(), page, "show feed replaced");
        let mut state = self.state.lock().expect("shows lock poisoned");
        state.shows = list.shows;
        state.pagination = list.pagination;
        Ok(())
    }

    /// Publish a show. Content is trimmed and validated locally first.
    pub async fn create_show(&self, content: &str, inventory_id: &str) -> StoreResult<()> {
        let req = CreateShowRequest {
            content: content.trim().to_string(),
            inventory_id: inventory_id.to_string(),
        };
        if let Err(errors) = req.validate() {
            return Err(StoreError::Validation(validation_message(&errors)));
        }

        let show = self.api.create_show(&req).await?;
        tracing::info!(show_id = %show.id, "show published");
        self.fetch_shows(1).await
    }

    /// Like or unlike a show, then refresh the current page
    pub async fn toggle_like(&self, show_id: &str) -> StoreResult<()> {
        {
            let mut state = self.state.lock().expect("shows lock poisoned");
            if state.busy.contains(show_id) {
                return Err(StoreError::Busy(show_id.to_string()));
            }
            state.busy.insert(show_id.to_string());
        }

        let result = self.api.toggle_like(show_id).await;
        self.state
            .lock()
            .expect("shows lock poisoned")
            .busy
            .remove(show_id);
        result?;

        let page = self.state.lock().expect("shows lock poisoned").pagination.page.max(1);
        self.fetch_shows(page).await
    }

    /// Delete one's own show, then refresh the current page. The UI must
    /// confirm with the user before calling this.
    pub async fn delete_show(&self, show_id: &str) -> StoreResult<()> {
        self.api.delete_show(show_id).await?;
        tracing::info!(show_id, "show deleted");
        let page = self.state.lock().expect("shows lock poisoned").pagination.page.max(1);
        self.fetch_shows(page).await
    }
}
