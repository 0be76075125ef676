//! CatalogStore - series listings and the current series detail
//!
//! The listing slot is filled by exactly one mode at a time (browse, search
//! or popular); switching modes replaces the listing wholesale. Failed
//! fetches leave stale data in place for the caller to keep rendering.

use std::sync::{Arc, Mutex};

use pixelbox_client::{Api, CatalogApi};
use shared::{Pagination, Series, SeriesQuery};

use super::StoreResult;

/// Default series page size
pub const SERIES_PAGE_SIZE: u32 = 12;

/// Which fetch strategy filled the listing slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingMode {
    #[default]
    Browse,
    Search(String),
    Popular,
}

/// Catalog state snapshot
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub series: Vec<Series>,
    pub pagination: Pagination,
    pub mode: ListingMode,
    pub current: Option<Series>,
    pub loading: bool,
}

/// Catalog store
pub struct CatalogStore {
    api: Arc<dyn Api>,
    state: Mutex<CatalogState>,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Snapshot for rendering
    pub fn state(&self) -> CatalogState {
        self.state.lock().expect("catalog lock poisoned").clone()
    }

    fn set_loading(&self, loading: bool) {
        self.state.lock().expect("catalog lock poisoned").loading = loading;
    }

    /// Fetch one page of the series listing
    pub async fn fetch_series(&self, page: u32, category: Option<String>) -> StoreResult<()> {
        let query = SeriesQuery {
            category,
            ..SeriesQuery::page(page, SERIES_PAGE_SIZE)
        };

        self.set_loading(true);
        let result = self.api.list_series(&query).await;
        self.set_loading(false);

        let list = result?;
        tracing::debug!(count = list.series.len(), page, "series listing replaced");
        let mut state = self.state.lock().expect("catalog lock poisoned");
        state.series = list.series;
        state.pagination = list.pagination;
        state.mode = ListingMode::Browse;
        Ok(())
    }

    /// Search series by keyword, replacing the listing slot
    pub async fn search_series(&self, keyword: &str, category: Option<String>) -> StoreResult<()> {
        let query = SeriesQuery::search(keyword, category);

        self.set_loading(true);
        let result = self.api.search_series(&query).await;
        self.set_loading(false);

        let list = result?;
        tracing::debug!(count = list.series.len(), keyword, "search results replaced listing");
        let mut state = self.state.lock().expect("catalog lock poisoned");
        state.series = list.series;
        state.pagination = list.pagination;
        state.mode = ListingMode::Search(keyword.to_string());
        Ok(())
    }

    /// Fetch the most popular series, replacing the listing slot
    pub async fn fetch_popular(&self, limit: u32) -> StoreResult<()> {
        self.set_loading(true);
        let result = self.api.popular_series(limit).await;
        self.set_loading(false);

        let list = result?;
        let mut state = self.state.lock().expect("catalog lock poisoned");
        state.series = list.series;
        state.pagination = list.pagination;
        state.mode = ListingMode::Popular;
        Ok(())
    }

    /// Fetch a single series with its item breakdown into the detail slot
    pub async fn fetch_series_detail(&self, id: &str) -> StoreResult<()> {
        self.set_loading(true);
        let result = self.api.series_detail(id).await;
        self.set_loading(false);

        let series = result?;
        tracing::debug!(series = %series.name, items = series.items.len(), "series detail loaded");
        self.state.lock().expect("catalog lock poisoned").current = Some(series);
        Ok(())
    }

    /// The currently loaded series detail
    pub fn current(&self) -> Option<Series> {
        self.state.lock().expect("catalog lock poisoned").current.clone()
    }
}
