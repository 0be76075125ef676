//! Order endpoints
//!
//! The pay/draw/cancel calls are status-transitioning: the server validates
//! the current order status and is the final authority on every transition.

use async_trait::async_trait;
use shared::{ApiResponse, CreateOrderRequest, CreatedOrder, Item, Order, OrderList, OrderQuery};

use super::{data_or_default, expect_data, expect_success};
use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Paginated order history, optionally filtered by status
    async fn list_orders(&self, query: &OrderQuery) -> ClientResult<OrderList>;

    /// Create a pending order for a series
    async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<CreatedOrder>;

    /// Full order record, including draw results when present
    async fn order_detail(&self, id: &str) -> ClientResult<Order>;

    /// Pay a pending order with points
    async fn pay_order(&self, id: &str) -> ClientResult<()>;

    /// Resolve a paid order into concrete items. The returned list is the
    /// authoritative draw result; the client performs no randomization.
    async fn draw_order(&self, id: &str) -> ClientResult<Vec<Item>>;

    /// Cancel a pending or paid order
    async fn cancel_order(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl OrderApi for HttpClient {
    async fn list_orders(&self, query: &OrderQuery) -> ClientResult<OrderList> {
        let resp: ApiResponse<OrderList> = self.get_query("api/orders", query).await?;
        expect_data(resp, "order list")
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<CreatedOrder> {
        let resp: ApiResponse<CreatedOrder> = self.post("api/orders", req).await?;
        expect_data(resp, "order creation")
    }

    async fn order_detail(&self, id: &str) -> ClientResult<Order> {
        let resp: ApiResponse<Order> = self.get(&format!("api/orders/{id}")).await?;
        expect_data(resp, "order detail")
    }

    async fn pay_order(&self, id: &str) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> =
            self.post_empty(&format!("api/orders/{id}/pay")).await?;
        expect_success(resp, "payment")
    }

    async fn draw_order(&self, id: &str) -> ClientResult<Vec<Item>> {
        let resp: ApiResponse<Vec<Item>> = self.post_empty(&format!("api/orders/{id}/draw")).await?;
        data_or_default(resp, "draw")
    }

    async fn cancel_order(&self, id: &str) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> =
            self.put_empty(&format!("api/orders/{id}/cancel")).await?;
        expect_success(resp, "cancellation")
    }
}
