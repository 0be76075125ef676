//! Order model and lifecycle
//!
//! Orders move through a small state machine driven entirely by server-side
//! transitions; the client only decides which transition to request:
//!
//! ```text
//! pending ──pay──▶ paid ──draw──▶ completed
//!    │               │
//!    └───cancel──────┴──cancel──▶ cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::series::{Item, SeriesSummary};
use crate::response::Pagination;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Payment is only offered for unpaid orders
    pub fn can_pay(self) -> bool {
        self == OrderStatus::Pending
    }

    /// A draw resolves a paid order exactly once
    pub fn can_draw(self) -> bool {
        self == OrderStatus::Paid
    }

    /// Cancellation diverts any non-terminal order
    pub fn can_cancel(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment method. Points is the only one the service accepts today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Points,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Points => "Points",
        }
    }
}

/// Draw purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub series_id: String,
    /// Series snapshot for display; may be trimmed on list endpoints
    #[serde(default)]
    pub series: Option<SeriesSummary>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// Draw results, populated once the order completes
    #[serde(default)]
    pub result_items: Vec<Item>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Order {
    /// `total_amount` must always equal `unit_price * quantity`
    pub fn total_is_consistent(&self) -> bool {
        self.total_amount == self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub series_id: String,
    pub quantity: u32,
}

/// Order creation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: String,
}

/// Paginated order listing payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Order listing query parameters. `status: None` means "all".
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_predicates() {
        assert!(OrderStatus::Pending.can_pay());
        assert!(!OrderStatus::Paid.can_pay());

        assert!(OrderStatus::Paid.can_draw());
        assert!(!OrderStatus::Pending.can_draw());
        assert!(!OrderStatus::Completed.can_draw());
        assert!(!OrderStatus::Cancelled.can_draw());

        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Paid.can_cancel());
        assert!(!OrderStatus::Completed.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn terminal_states_offer_nothing() {
        for status in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(status.is_terminal());
            assert!(!status.can_pay());
            assert!(!status.can_draw());
            assert!(!status.can_cancel());
        }
    }

    #[test]
    fn status_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), r#""pending""#);
        let s: OrderStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(s, OrderStatus::Cancelled);
    }

    #[test]
    fn total_consistency() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "o1",
                "orderNumber": "PB20240101",
                "seriesId": "s1",
                "quantity": 3,
                "unitPrice": 100.0,
                "totalAmount": 300.0,
                "status": "pending",
                "createdAt": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(order.total_is_consistent());
        assert!(order.result_items.is_empty());
    }
}
