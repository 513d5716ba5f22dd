//! Day-scoped order number allocation against the in-memory order store
//!
//! The store enforces the unique index on order numbers, so these tests
//! exercise the candidate loop and the single insert retry the way MySQL would.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use helpers::{simple_order, utc, InMemoryOrderRepository};
use restaurant_pos::core::{AppError, BusinessClock};
use restaurant_pos::modules::orders::models::{CreateOrderRequest, OrderItem};
use restaurant_pos::modules::orders::services::order_number_allocator::{
    OrderNumberAllocator, MAX_ALLOCATION_ATTEMPTS,
};
use restaurant_pos::modules::orders::OrderService;
use rust_decimal_macros::dec;

fn request() -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![OrderItem::new("Nasi Goreng", 1, dec!(25000))],
        discount: None,
        status: None,
        payment_status: None,
        table_number: Some("4".to_string()),
        customer_name: None,
    }
}

fn service(repo: &Arc<InMemoryOrderRepository>) -> OrderService {
    OrderService::new(repo.clone(), BusinessClock::utc())
}

#[tokio::test]
async fn test_numbers_are_sequential_within_a_day() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let orders = service(&repo);
    let at = utc(2025, 9, 20, 10, 0);

    let mut numbers = Vec::new();
    for _ in 0..3 {
        numbers.push(orders.create_order_at(request(), "user-1", at).await.unwrap().order_number);
    }

    assert_eq!(numbers, vec!["1-20250920", "2-20250920", "3-20250920"]);
}

#[tokio::test]
async fn test_numbering_restarts_each_day() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let orders = service(&repo);

    orders.create_order_at(request(), "user-1", utc(2025, 9, 20, 22, 0)).await.unwrap();
    orders.create_order_at(request(), "user-1", utc(2025, 9, 20, 23, 0)).await.unwrap();
    let next_day = orders
        .create_order_at(request(), "user-1", utc(2025, 9, 21, 0, 5))
        .await
        .unwrap();

    assert_eq!(next_day.order_number, "1-20250921");
}

#[tokio::test]
async fn test_day_follows_reference_timezone() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let clock = BusinessClock::from_name("Asia/Jakarta").unwrap();
    let orders = OrderService::new(repo.clone(), clock);

    // 18:30 UTC is 01:30 the next morning in Jakarta
    let order = orders
        .create_order_at(request(), "user-1", utc(2025, 9, 20, 18, 30))
        .await
        .unwrap();

    assert_eq!(order.order_number, "1-20250921");
}

#[tokio::test]
async fn test_next_number_follows_highest_existing() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let at = utc(2025, 9, 20, 10, 0);
    repo.seed(simple_order("3-20250920", at, "Sate", dec!(10))).await;
    repo.seed(simple_order("11-20250920", at, "Sate", dec!(10))).await;
    repo.seed(simple_order("40-20250919", at, "Sate", dec!(10))).await;

    let order = service(&repo).create_order_at(request(), "user-1", at).await.unwrap();

    assert_eq!(order.order_number, "12-20250920");
}

#[tokio::test]
async fn test_lost_insert_race_is_retried_once() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    repo.fail_next_inserts(1);

    let order = service(&repo)
        .create_order_at(request(), "user-1", utc(2025, 9, 20, 10, 0))
        .await
        .unwrap();

    assert_eq!(order.order_number, "1-20250920");
    assert_eq!(repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_second_lost_race_fails_the_request() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    repo.fail_next_inserts(2);

    let err = service(&repo)
        .create_order_at(request(), "user-1", utc(2025, 9, 20, 10, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::AllocationExhausted(_)));
    assert!(repo.all().await.is_empty(), "no order may be written");
}

#[tokio::test]
async fn test_default_ceiling_reports_exhaustion() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    repo.report_all_taken();

    let err = OrderNumberAllocator::new(repo.clone(), BusinessClock::utc())
        .allocate(utc(2025, 9, 20, 10, 0))
        .await
        .unwrap_err();

    match err {
        AppError::AllocationExhausted(msg) => {
            assert!(msg.contains(&MAX_ALLOCATION_ATTEMPTS.to_string()), "{}", msg)
        }
        other => panic!("expected AllocationExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_custom_ceiling_fails_order_creation() {
    let repo = Arc::new(InMemoryOrderRepository::new());
    repo.report_all_taken();
    let allocator = OrderNumberAllocator::new(repo.clone(), BusinessClock::utc()).with_max_attempts(3);
    let orders = OrderService::with_allocator(repo.clone(), allocator);

    let err = orders
        .create_order_at(request(), "user-1", utc(2025, 9, 20, 10, 0))
        .await
        .unwrap_err();

    match err {
        AppError::AllocationExhausted(msg) => assert!(msg.ends_with("after 3 attempts"), "{}", msg),
        other => panic!("expected AllocationExhausted, got {:?}", other),
    }
    assert!(repo.all().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_creates_never_share_a_number() {
    let repo = Arc::new(InMemoryOrderRepository::racy());
    let orders = Arc::new(service(&repo));
    let at = utc(2025, 9, 20, 12, 0);

    let results = join_all((0..2).map(|_| {
        let orders = orders.clone();
        async move { orders.create_order_at(request(), "user-1", at).await }
    }))
    .await;

    let numbers: HashSet<String> = results
        .into_iter()
        .map(|r| r.unwrap().order_number)
        .collect();
    let expected: HashSet<String> = ["1-20250920", "2-20250920"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(numbers, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_burst_keeps_numbers_unique() {
    let repo = Arc::new(InMemoryOrderRepository::racy());
    let orders = Arc::new(service(&repo));
    let at = utc(2025, 9, 20, 12, 0);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let orders = orders.clone();
            tokio::spawn(async move { orders.create_order_at(request(), "user-1", at).await })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(order) => created.push(order.order_number),
            // Losing the race twice is allowed; a duplicate is not
            Err(AppError::AllocationExhausted(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    let unique: HashSet<&String> = created.iter().collect();
    assert_eq!(unique.len(), created.len(), "duplicate order numbers: {:?}", created);
    assert!(!created.is_empty());

    let stored = repo.all().await;
    assert_eq!(stored.len(), created.len());
    assert!(stored.iter().all(|o| o.order_number.ends_with("-20250920")));
}
