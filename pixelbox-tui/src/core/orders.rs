//! OrderStore - the draw-purchase workflow
//!
//! Drives the order lifecycle (`pending → paid → completed`, with
//! cancellation from the two non-terminal states). Every transition is
//! guarded client-side against the cached status before any network call;
//! the server remains the final authority and is re-fetched after each
//! transition. A per-order in-flight set makes duplicate concurrent
//! submissions structurally impossible rather than relying on disabled UI
//! controls.
//!
//! Payment optimistically debits the cached balance by the order total; the
//! next authoritative profile fetch supersedes that arithmetic. No balance
//! reconciliation is attempted for a paid-then-cancelled order.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pixelbox_client::{Api, OrderApi};
use rust_decimal::Decimal;
use shared::{CreateOrderRequest, Item, Order, OrderQuery, OrderStatus, Pagination, Series};

use super::{SessionStore, StoreError, StoreResult};

/// Default order page size
pub const ORDERS_PAGE_SIZE: u32 = 10;

/// Order state snapshot
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
    /// Active status filter; `None` lists every status
    pub filter: Option<OrderStatus>,
    pub current: Option<Order>,
    /// Items returned by the most recent draw, for the reveal display
    pub last_draw: Option<Vec<Item>>,
    pub loading: bool,
    creating: bool,
    busy: HashSet<String>,
}

impl OrderState {
    /// True while a transition for this order is outstanding
    pub fn is_busy(&self, order_id: &str) -> bool {
        self.busy.contains(order_id)
    }
}

/// Order workflow store
pub struct OrderStore {
    api: Arc<dyn Api>,
    state: Mutex<OrderState>,
}

impl OrderStore {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            state: Mutex::new(OrderState::default()),
        }
    }

    /// Snapshot for rendering
    pub fn state(&self) -> OrderState {
        self.state.lock().expect("orders lock poisoned").clone()
    }

    /// The currently loaded order detail
    pub fn current(&self) -> Option<Order> {
        self.state.lock().expect("orders lock poisoned").current.clone()
    }

    fn set_loading(&self, loading: bool) {
        self.state.lock().expect("orders lock poisoned").loading = loading;
    }

    /// Fetch one page of order history
    pub async fn fetch_orders(&self, page: u32, filter: Option<OrderStatus>) -> StoreResult<()> {
        let query = OrderQuery {
            page: Some(page),
            limit: Some(ORDERS_PAGE_SIZE),
            status: filter,
        };

        self.set_loading(true);
        let result = self.api.list_orders(&query).await;
        self.set_loading(false);

        let list = result?;
        tracing::debug!(count = list.orders.len(), page, "order listing replaced");
        let mut state = self.state.lock().expect("orders lock poisoned");
        state.orders = list.orders;
        state.pagination = list.pagination;
        state.filter = filter;
        Ok(())
    }

    /// Fetch the full order record into the detail slot
    pub async fn fetch_detail(&self, order_id: &str) -> StoreResult<()> {
        self.set_loading(true);
        let result = self.api.order_detail(order_id).await;
        self.set_loading(false);

        let order = result?;
        if !order.total_is_consistent() {
            tracing::warn!(order_id, "server returned inconsistent order total");
        }
        self.state.lock().expect("orders lock poisoned").current = Some(order);
        Ok(())
    }

    /// Create a pending order for a series.
    ///
    /// Fast-fail guards: the user must be logged in and the cached balance
    /// must cover `price * quantity`. Neither guard issues a network call.
    /// The balance is NOT debited here; payment is a separate transition.
    pub async fn purchase(
        &self,
        session: &SessionStore,
        series: &Series,
        quantity: u32,
    ) -> StoreResult<String> {
        let user = session.user().ok_or(StoreError::NotAuthenticated)?;
        let total = series.price * Decimal::from(quantity);
        if user.points < total {
            return Err(StoreError::InsufficientBalance {
                required: total,
                balance: user.points,
            });
        }

        {
            let mut state = self.state.lock().expect("orders lock poisoned");
            if state.creating {
                return Err(StoreError::Busy("create".to_string()));
            }
            state.creating = true;
        }

        let req = CreateOrderRequest {
            series_id: series.id.clone(),
            quantity,
        };
        let result = self.api.create_order(&req).await;
        self.state.lock().expect("orders lock poisoned").creating = false;

        let created = result?;
        tracing::info!(
            order_id = %created.order_id,
            series = %series.name,
            quantity,
            total = %total,
            "order created"
        );
        Ok(created.order_id)
    }

    /// Pay a pending order with points.
    ///
    /// On acknowledgment the cached balance is optimistically debited by the
    /// order total and the order is re-fetched for authoritative state. On
    /// failure nothing changes locally and the server's message is surfaced.
    pub async fn pay(&self, session: &SessionStore, order_id: &str) -> StoreResult<()> {
        let order = self.guarded_order(order_id, "pay", OrderStatus::can_pay)?;

        let balance = session.points().ok_or(StoreError::NotAuthenticated)?;
        if balance < order.total_amount {
            self.release(order_id);
            return Err(StoreError::InsufficientBalance {
                required: order.total_amount,
                balance,
            });
        }

        let result = self.api.pay_order(order_id).await;
        self.release(order_id);
        result?;

        if let Err(e) = session.update_user(|u| u.points -= order.total_amount) {
            tracing::warn!("failed to apply optimistic balance update: {}", e);
        }
        tracing::info!(order_id, total = %order.total_amount, "order paid");

        // Local status flip keeps the UI coherent even if the confirming
        // re-fetch fails; the fetch result wins when it arrives.
        self.set_current_status(order_id, OrderStatus::Paid);
        if let Err(e) = self.fetch_detail(order_id).await {
            tracing::warn!(order_id, "failed to refresh order after payment: {}", e);
        }
        Ok(())
    }

    /// Resolve a paid order. The server returns the authoritative item list;
    /// the draw is rejected locally for any status other than `paid`.
    pub async fn draw(&self, order_id: &str) -> StoreResult<Vec<Item>> {
        self.guarded_order(order_id, "draw", OrderStatus::can_draw)?;

        let result = self.api.draw_order(order_id).await;
        self.release(order_id);

        let items = result?;
        tracing::info!(order_id, count = items.len(), "draw resolved");
        {
            let mut state = self.state.lock().expect("orders lock poisoned");
            state.last_draw = Some(items.clone());
            if let Some(current) = state.current.as_mut().filter(|o| o.id == order_id) {
                current.status = OrderStatus::Completed;
                current.result_items = items.clone();
            }
        }
        if let Err(e) = self.fetch_detail(order_id).await {
            tracing::warn!(order_id, "failed to refresh order after draw: {}", e);
        }
        Ok(items)
    }

    /// Cancel a pending or paid order. The UI must confirm with the user
    /// before calling this.
    pub async fn cancel(&self, order_id: &str) -> StoreResult<()> {
        self.guarded_order(order_id, "cancel", OrderStatus::can_cancel)?;

        let result = self.api.cancel_order(order_id).await;
        self.release(order_id);
        result?;

        tracing::info!(order_id, "order cancelled");
        self.set_current_status(order_id, OrderStatus::Cancelled);
        if let Err(e) = self.fetch_detail(order_id).await {
            tracing::warn!(order_id, "failed to refresh order after cancellation: {}", e);
        }
        Ok(())
    }

    /// Common transition preamble: the order must be loaded, not busy, and
    /// its cached status must permit the action. Marks the order busy on
    /// success; the caller releases it after the network call returns.
    fn guarded_order(
        &self,
        order_id: &str,
        action: &'static str,
        permitted: impl Fn(OrderStatus) -> bool,
    ) -> StoreResult<Order> {
        let mut state = self.state.lock().expect("orders lock poisoned");
        if state.busy.contains(order_id) {
            return Err(StoreError::Busy(order_id.to_string()));
        }
        let order = state
            .current
            .as_ref()
            .filter(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| StoreError::Validation("order not loaded".to_string()))?;
        if !permitted(order.status) {
            return Err(StoreError::InvalidTransition {
                status: order.status,
                action,
            });
        }
        state.busy.insert(order_id.to_string());
        Ok(order)
    }

    fn release(&self, order_id: &str) {
        self.state
            .lock()
            .expect("orders lock poisoned")
            .busy
            .remove(order_id);
    }

    fn set_current_status(&self, order_id: &str, status: OrderStatus) {
        let mut state = self.state.lock().expect("orders lock poisoned");
        if let Some(current) = state.current.as_mut().filter(|o| o.id == order_id) {
            current.status = status;
        }
    }
}
