//! Shared test fixtures: an in-memory API standing in for the server

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use pixelbox_client::{
    AuthApi, CatalogApi, ClientError, ClientResult, InventoryApi, OrderApi, ShowApi, UserApi,
};
use rust_decimal::Decimal;
use shared::{
    CreateOrderRequest, CreateShowRequest, CreatedOrder, InventoryEntry, InventoryFilter,
    InventoryList, Item, LoginData, LoginRequest, Order, OrderList, OrderQuery, OrderStatus,
    PageQuery, Pagination, PaymentMethod, PlayerShow, PointsHistory, Rarity, RegisterRequest,
    Series, SeriesList, SeriesQuery, ShowList, ShowQuery, TokenData, UpdateProfileRequest, User,
    UserSummary,
};

pub fn user(points: i64) -> User {
    User {
        id: "user-1".to_string(),
        username: "pixel_fan".to_string(),
        email: "fan@example.com".to_string(),
        nickname: None,
        points: Decimal::from(points),
        level: 1,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

pub fn series(id: &str, price: i64) -> Series {
    Series {
        id: id.to_string(),
        name: format!("Series {id}"),
        description: None,
        cover_image: None,
        price: Decimal::from(price),
        popularity: 42,
        items: Vec::new(),
        is_hot: false,
        is_new: false,
    }
}

pub fn item(id: &str, rarity: Rarity) -> Item {
    Item {
        id: id.to_string(),
        name: format!("Item {id}"),
        description: None,
        image: None,
        rarity,
        drop_rate: None,
        series: None,
    }
}

pub fn entry(id: &str, rarity: Rarity, is_favorite: bool) -> InventoryEntry {
    InventoryEntry {
        id: id.to_string(),
        item: item(&format!("of-{id}"), rarity),
        quantity: 1,
        is_favorite,
        is_displayed: false,
        acquired_at: None,
    }
}

/// In-memory server double. Counts every network endpoint invocation so
/// tests can assert that client-side guards issued no request at all.
#[derive(Default)]
pub struct MockApi {
    pub token: Mutex<Option<String>>,
    calls: Mutex<Vec<&'static str>>,
    next_order: AtomicUsize,

    pub account: Mutex<Option<User>>,
    pub catalog: Mutex<Vec<Series>>,
    pub orders: Mutex<HashMap<String, Order>>,
    pub draw_items: Mutex<Vec<Item>>,
    pub inventory: Mutex<Vec<InventoryEntry>>,
    pub shows: Mutex<Vec<PlayerShow>>,

    pub fail_login: Mutex<Option<String>>,
    pub fail_pay: Mutex<Option<String>>,
    pub fail_logout: AtomicBool,
    pub fail_refresh: AtomicBool,
    pub fail_favorite: AtomicBool,
    /// Yield once inside pay/favorite endpoints so overlapping futures can
    /// interleave in busy-guard tests
    pub slow_endpoints: AtomicBool,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, user: User) -> Self {
        *self.account.lock().unwrap() = Some(user);
        self
    }

    pub fn with_series(self, series: Series) -> Self {
        self.catalog.lock().unwrap().push(series);
        self
    }

    pub fn with_draw_items(self, items: Vec<Item>) -> Self {
        *self.draw_items.lock().unwrap() = items;
        self
    }

    pub fn with_inventory(self, entries: Vec<InventoryEntry>) -> Self {
        *self.inventory.lock().unwrap() = entries;
        self
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }

    /// How many times a given endpoint was hit
    pub fn count(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == endpoint).count()
    }

    /// Total network requests issued
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn maybe_yield(&self) {
        if self.slow_endpoints.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    }

    fn current_account(&self) -> ClientResult<User> {
        self.account
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Unauthorized)
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login(&self, _req: &LoginRequest) -> ClientResult<LoginData> {
        self.record("login");
        if let Some(message) = self.fail_login.lock().unwrap().take() {
            return Err(ClientError::Auth(message));
        }
        Ok(LoginData {
            token: "test-token".to_string(),
            user: self.current_account()?,
        })
    }

    async fn register(&self, _req: &RegisterRequest) -> ClientResult<()> {
        self.record("register");
        Ok(())
    }

    async fn logout(&self) -> ClientResult<()> {
        self.record("logout");
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(ClientError::Api("server unavailable".to_string()));
        }
        Ok(())
    }

    async fn refresh_token(&self) -> ClientResult<TokenData> {
        self.record("refresh");
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(ClientError::Auth("refresh rejected".to_string()));
        }
        Ok(TokenData {
            token: "refreshed-token".to_string(),
        })
    }

    fn set_token(&self, token: Option<&str>) {
        *self.token.lock().unwrap() = token.map(str::to_string);
    }
}

#[async_trait]
impl CatalogApi for MockApi {
    async fn list_series(&self, _query: &SeriesQuery) -> ClientResult<SeriesList> {
        self.record("list_series");
        let series = self.catalog.lock().unwrap().clone();
        let total = series.len() as u64;
        Ok(SeriesList {
            series,
            pagination: Pagination::new(1, 12, total),
        })
    }

    async fn search_series(&self, _query: &SeriesQuery) -> ClientResult<SeriesList> {
        self.record("search_series");
        self.list_series(_query).await
    }

    async fn popular_series(&self, _limit: u32) -> ClientResult<SeriesList> {
        self.record("popular_series");
        let series = self.catalog.lock().unwrap().clone();
        Ok(SeriesList {
            series,
            pagination: Pagination::default(),
        })
    }

    async fn series_detail(&self, id: &str) -> ClientResult<Series> {
        self.record("series_detail");
        self.catalog
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("series not found".to_string()))
    }
}

#[async_trait]
impl OrderApi for MockApi {
    async fn list_orders(&self, query: &OrderQuery) -> ClientResult<OrderList> {
        self.record("list_orders");
        let orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .filter(|o| query.status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        let total = orders.len() as u64;
        Ok(OrderList {
            orders,
            pagination: Pagination::new(1, 10, total),
        })
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<CreatedOrder> {
        self.record("create_order");
        let series = self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == req.series_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("series not found".to_string()))?;

        let n = self.next_order.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("order-{n}");
        let order = Order {
            id: id.clone(),
            order_number: format!("PB2024{n:06}"),
            series_id: series.id.clone(),
            series: None,
            quantity: req.quantity,
            unit_price: series.price,
            total_amount: series.price * Decimal::from(req.quantity),
            payment_method: PaymentMethod::Points,
            status: OrderStatus::Pending,
            result_items: Vec::new(),
            created_at: Utc::now(),
            paid_at: None,
            completed_at: None,
        };
        self.orders.lock().unwrap().insert(id.clone(), order);
        Ok(CreatedOrder { order_id: id })
    }

    async fn order_detail(&self, id: &str) -> ClientResult<Order> {
        self.record("order_detail");
        self.orders
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("order not found".to_string()))
    }

    async fn pay_order(&self, id: &str) -> ClientResult<()> {
        self.record("pay_order");
        self.maybe_yield().await;
        if let Some(message) = self.fail_pay.lock().unwrap().take() {
            return Err(ClientError::Api(message));
        }
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound("order not found".to_string()))?;
        order.status = OrderStatus::Paid;
        order.paid_at = Some(Utc::now());
        Ok(())
    }

    async fn draw_order(&self, id: &str) -> ClientResult<Vec<Item>> {
        self.record("draw_order");
        let items = self.draw_items.lock().unwrap().clone();
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound("order not found".to_string()))?;
        order.status = OrderStatus::Completed;
        order.result_items = items.clone();
        order.completed_at = Some(Utc::now());
        Ok(items)
    }

    async fn cancel_order(&self, id: &str) -> ClientResult<()> {
        self.record("cancel_order");
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound("order not found".to_string()))?;
        order.status = OrderStatus::Cancelled;
        Ok(())
    }
}

#[async_trait]
impl InventoryApi for MockApi {
    async fn list_inventory(&self, _filter: &InventoryFilter) -> ClientResult<InventoryList> {
        self.record("list_inventory");
        let items = self.inventory.lock().unwrap().clone();
        let total = items.len() as u64;
        Ok(InventoryList {
            items,
            pagination: Pagination::new(1, 20, total),
        })
    }

    async fn set_favorite(&self, entry_id: &str, is_favorite: bool) -> ClientResult<()> {
        self.record("set_favorite");
        self.maybe_yield().await;
        if self.fail_favorite.load(Ordering::SeqCst) {
            return Err(ClientError::Api("favorite update rejected".to_string()));
        }
        if let Some(entry) = self.inventory.lock().unwrap().iter_mut().find(|e| e.id == entry_id) {
            entry.is_favorite = is_favorite;
        }
        Ok(())
    }

    async fn set_display(&self, entry_id: &str, is_displayed: bool) -> ClientResult<()> {
        self.record("set_display");
        if let Some(entry) = self.inventory.lock().unwrap().iter_mut().find(|e| e.id == entry_id) {
            entry.is_displayed = is_displayed;
        }
        Ok(())
    }
}

#[async_trait]
impl UserApi for MockApi {
    async fn profile(&self) -> ClientResult<User> {
        self.record("profile");
        self.current_account()
    }

    async fn update_profile(&self, req: &UpdateProfileRequest) -> ClientResult<User> {
        self.record("update_profile");
        let mut account = self.account.lock().unwrap();
        let user = account.as_mut().ok_or(ClientError::Unauthorized)?;
        if let Some(nickname) = &req.nickname {
            user.nickname = Some(nickname.clone());
        }
        Ok(user.clone())
    }

    async fn points_history(&self, _query: &PageQuery) -> ClientResult<PointsHistory> {
        self.record("points_history");
        Ok(PointsHistory {
            records: Vec::new(),
            pagination: Pagination::default(),
        })
    }
}

#[async_trait]
impl ShowApi for MockApi {
    async fn list_shows(&self, _query: &ShowQuery) -> ClientResult<ShowList> {
        self.record("list_shows");
        let shows = self.shows.lock().unwrap().clone();
        let total = shows.len() as u64;
        Ok(ShowList {
            shows,
            pagination: Pagination::new(1, 10, total),
        })
    }

    async fn create_show(&self, req: &CreateShowRequest) -> ClientResult<PlayerShow> {
        self.record("create_show");
        let user = self.current_account()?;
        let show = PlayerShow {
            id: format!("show-{}", self.shows.lock().unwrap().len() + 1),
            user: UserSummary {
                id: user.id,
                username: user.username,
                nickname: user.nickname,
            },
            content: req.content.clone(),
            item: None,
            likes_count: 0,
            is_liked: false,
            created_at: Utc::now(),
        };
        self.shows.lock().unwrap().push(show.clone());
        Ok(show)
    }

    async fn toggle_like(&self, id: &str) -> ClientResult<()> {
        self.record("toggle_like");
        if let Some(show) = self.shows.lock().unwrap().iter_mut().find(|s| s.id == id) {
            show.is_liked = !show.is_liked;
            show.likes_count = if show.is_liked {
                show.likes_count + 1
            } else {
                show.likes_count.saturating_sub(1)
            };
        }
        Ok(())
    }

    async fn delete_show(&self, id: &str) -> ClientResult<()> {
        self.record("delete_show");
        self.shows.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}
