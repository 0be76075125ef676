//! Order workflow integration tests against the in-memory API

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::MockApi;
use pixelbox_tui::core::{AppContext, StoreError};
use rust_decimal::Decimal;
use shared::{LoginRequest, OrderStatus, Rarity};
use tempfile::TempDir;

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "pixel_fan".to_string(),
        password: "secret1".to_string(),
    }
}

async fn logged_in_context(api: Arc<MockApi>, dir: &TempDir) -> AppContext {
    let ctx = AppContext::new(api, dir.path()).unwrap();
    ctx.session.login(credentials()).await.unwrap();
    ctx
}

#[tokio::test]
async fn purchase_blocks_when_balance_is_insufficient() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(50))
            .with_series(common::series("s1", 100)),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;
    let calls_before = api.total_calls();

    let series = common::series("s1", 100);
    let err = ctx.orders.purchase(&ctx.session, &series, 1).await.unwrap_err();

    match err {
        StoreError::InsufficientBalance { required, balance } => {
            assert_eq!(required, Decimal::from(100));
            assert_eq!(balance, Decimal::from(50));
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }
    // The guard must fire before any network request is issued
    assert_eq!(api.total_calls(), calls_before);
    assert_eq!(api.count("create_order"), 0);
}

#[tokio::test]
async fn purchase_pay_draw_happy_path() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(150))
            .with_series(common::series("s1", 100))
            .with_draw_items(vec![common::item("prize", Rarity::Legendary)]),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;

    let series = common::series("s1", 100);
    let order_id = ctx.orders.purchase(&ctx.session, &series, 1).await.unwrap();
    ctx.orders.fetch_detail(&order_id).await.unwrap();

    let order = ctx.orders.current().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.total_is_consistent());
    assert_eq!(order.total_amount, Decimal::from(100));
    // Creation does not touch the balance
    assert_eq!(ctx.session.points(), Some(Decimal::from(150)));

    ctx.orders.pay(&ctx.session, &order_id).await.unwrap();
    // Optimistic debit by exactly the order total
    assert_eq!(ctx.session.points(), Some(Decimal::from(50)));
    assert_eq!(ctx.orders.current().unwrap().status, OrderStatus::Paid);

    let items = ctx.orders.draw(&order_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].rarity, Rarity::Legendary);

    let order = ctx.orders.current().unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(!order.result_items.is_empty());
    assert_eq!(ctx.orders.state().last_draw.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn draw_is_rejected_client_side_unless_paid() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(500))
            .with_series(common::series("s1", 100)),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;

    let series = common::series("s1", 100);
    let order_id = ctx.orders.purchase(&ctx.session, &series, 1).await.unwrap();
    ctx.orders.fetch_detail(&order_id).await.unwrap();

    // Pending order: draw must be refused without a network call
    let err = ctx.orders.draw(&order_id).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidTransition {
            status: OrderStatus::Pending,
            action: "draw"
        }
    ));
    assert_eq!(api.count("draw_order"), 0);

    // Completed order: same rejection
    ctx.orders.pay(&ctx.session, &order_id).await.unwrap();
    ctx.orders.draw(&order_id).await.unwrap();
    assert_eq!(api.count("draw_order"), 1);
    let err = ctx.orders.draw(&order_id).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidTransition {
            status: OrderStatus::Completed,
            ..
        }
    ));
    assert_eq!(api.count("draw_order"), 1);
}

#[tokio::test]
async fn cancel_is_limited_to_pending_and_paid() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(500))
            .with_series(common::series("s1", 100)),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;

    let series = common::series("s1", 100);
    let order_id = ctx.orders.purchase(&ctx.session, &series, 1).await.unwrap();
    ctx.orders.fetch_detail(&order_id).await.unwrap();

    ctx.orders.cancel(&order_id).await.unwrap();
    let order = ctx.orders.current().unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    // A cancelled order offers no further transitions
    assert!(!order.status.can_pay());
    assert!(!order.status.can_draw());
    assert!(!order.status.can_cancel());

    let err = ctx.orders.cancel(&order_id).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition { .. }));
    assert_eq!(api.count("cancel_order"), 1);

    // Pay and draw are rejected locally too
    assert!(matches!(
        ctx.orders.pay(&ctx.session, &order_id).await.unwrap_err(),
        StoreError::InvalidTransition { .. }
    ));
    assert_eq!(api.count("pay_order"), 0);
}

#[tokio::test]
async fn pay_failure_keeps_balance_and_status_untouched() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(150))
            .with_series(common::series("s1", 100)),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;

    let series = common::series("s1", 100);
    let order_id = ctx.orders.purchase(&ctx.session, &series, 1).await.unwrap();
    ctx.orders.fetch_detail(&order_id).await.unwrap();

    *api.fail_pay.lock().unwrap() = Some("insufficient points on server".to_string());
    let err = ctx.orders.pay(&ctx.session, &order_id).await.unwrap_err();

    // Server message is surfaced verbatim
    assert_eq!(err.user_message("Payment failed"), "insufficient points on server");
    // No balance mutation, order still pending
    assert_eq!(ctx.session.points(), Some(Decimal::from(150)));
    assert_eq!(ctx.orders.current().unwrap().status, OrderStatus::Pending);

    // The failed attempt released the in-flight guard; a retry succeeds
    ctx.orders.pay(&ctx.session, &order_id).await.unwrap();
    assert_eq!(ctx.session.points(), Some(Decimal::from(50)));
}

#[tokio::test]
async fn concurrent_pay_attempts_collapse_to_one_request() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(500))
            .with_series(common::series("s1", 100)),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;

    let series = common::series("s1", 100);
    let order_id = ctx.orders.purchase(&ctx.session, &series, 1).await.unwrap();
    ctx.orders.fetch_detail(&order_id).await.unwrap();

    api.slow_endpoints.store(true, Ordering::SeqCst);
    let (first, second) = tokio::join!(
        ctx.orders.pay(&ctx.session, &order_id),
        ctx.orders.pay(&ctx.session, &order_id),
    );

    let busy_count = [&first, &second]
        .iter()
        .filter(|r| matches!(r, Err(StoreError::Busy(_))))
        .count();
    assert_eq!(busy_count, 1, "exactly one attempt must be rejected as busy");
    assert_eq!(api.count("pay_order"), 1, "only one request may reach the server");
    // The winning attempt debited the balance exactly once
    assert_eq!(ctx.session.points(), Some(Decimal::from(400)));
}

#[tokio::test]
async fn order_total_follows_unit_price_times_quantity() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_account(common::user(1000))
            .with_series(common::series("s1", 75)),
    );
    let ctx = logged_in_context(api.clone(), &dir).await;

    let series = common::series("s1", 75);
    let order_id = ctx.orders.purchase(&ctx.session, &series, 3).await.unwrap();
    ctx.orders.fetch_detail(&order_id).await.unwrap();

    let order = ctx.orders.current().unwrap();
    assert_eq!(order.quantity, 3);
    assert_eq!(order.total_amount, Decimal::from(225));
    assert!(order.total_is_consistent());
}
