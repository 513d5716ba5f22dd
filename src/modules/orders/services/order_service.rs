use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{AppError, BusinessClock, Result};
use crate::modules::orders::models::{
    CreateOrderRequest, Order, OrderFilter, OrderTotals, UpdateOrderRequest,
    DEFAULT_PAYMENT_STATUS,
};
use crate::modules::orders::repositories::OrderRepository;
use crate::modules::orders::services::order_number_allocator::OrderNumberAllocator;

/// Service for order business logic
pub struct OrderService {
    order_repo: Arc<dyn OrderRepository>,
    allocator: OrderNumberAllocator,
}

impl OrderService {
    pub fn new(order_repo: Arc<dyn OrderRepository>, clock: BusinessClock) -> Self {
        let allocator = OrderNumberAllocator::new(order_repo.clone(), clock);
        Self {
            order_repo,
            allocator,
        }
    }

    /// Build the service around a preconfigured allocator
    pub fn with_allocator(
        order_repo: Arc<dyn OrderRepository>,
        allocator: OrderNumberAllocator,
    ) -> Self {
        Self {
            order_repo,
            allocator,
        }
    }

    pub fn clock(&self) -> BusinessClock {
        self.allocator.clock()
    }

    /// Create an order placed now
    pub async fn create_order(&self, request: CreateOrderRequest, created_by: &str) -> Result<Order> {
        self.create_order_at(request, created_by, Utc::now()).await
    }

    /// Create an order placed at `order_time`.
    ///
    /// The order number is allocated for the calendar day of `order_time`.
    /// A duplicate-key failure on insert means another request committed the
    /// same number first: a fresh number is allocated and the insert is
    /// retried exactly once. A second duplicate is fatal for this request.
    pub async fn create_order_at(
        &self,
        request: CreateOrderRequest,
        created_by: &str,
        order_time: DateTime<Utc>,
    ) -> Result<Order> {
        let totals =
            OrderTotals::compute(&request.items, request.discount.unwrap_or(Decimal::ZERO))?;
        let payment_status = normalize_payment_status(request.payment_status)?;

        let mut order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: self.allocator.allocate(order_time).await?,
            order_time,
            items: request.items,
            total_amount: totals.total_amount,
            discount: totals.discount,
            final_amount: totals.final_amount,
            status: request.status.unwrap_or_default(),
            payment_status,
            table_number: trim_optional(request.table_number),
            customer_name: trim_optional(request.customer_name),
            created_by: created_by.to_string(),
            is_archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        match self.order_repo.insert(&order).await {
            Ok(()) => {}
            Err(AppError::DuplicateOrderNumber(taken)) => {
                warn!(
                    order_number = %taken,
                    "Order number claimed by a concurrent insert, allocating again"
                );
                order.order_number = self.allocator.allocate(order_time).await?;

                match self.order_repo.insert(&order).await {
                    Ok(()) => {}
                    Err(AppError::DuplicateOrderNumber(taken_again)) => {
                        return Err(AppError::AllocationExhausted(format!(
                            "order number {} was taken again on retry",
                            taken_again
                        )));
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        }

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            final_amount = %order.final_amount,
            "Order created"
        );

        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order> {
        self.order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", id)))
    }

    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        self.order_repo.list(filter).await
    }

    /// Apply a partial update; totals are recomputed when items or discount change
    pub async fn update_order(&self, id: &str, request: UpdateOrderRequest) -> Result<Order> {
        let mut order = self.get_order(id).await?;
        order.ensure_mutable()?;

        if request.items.is_some() || request.discount.is_some() {
            let items = request.items.unwrap_or_else(|| order.items.clone());
            let discount = request.discount.unwrap_or(order.discount);
            let totals = OrderTotals::compute(&items, discount)?;
            order.items = items;
            order.apply_totals(totals);
        }

        if let Some(status) = request.status {
            order.status = status;
        }
        if request.payment_status.is_some() {
            order.payment_status = normalize_payment_status(request.payment_status)?;
        }
        if request.table_number.is_some() {
            order.table_number = trim_optional(request.table_number);
        }
        if request.customer_name.is_some() {
            order.customer_name = trim_optional(request.customer_name);
        }

        order.updated_at = Utc::now();
        self.order_repo.update(&order).await?;

        info!(order_id = %order.id, status = %order.status, "Order updated");

        Ok(order)
    }

    /// Archive an order; archived orders are immutable
    pub async fn archive_order(&self, id: &str) -> Result<Order> {
        let mut order = self.get_order(id).await?;
        order.ensure_mutable()?;

        order.is_archived = true;
        order.updated_at = Utc::now();
        self.order_repo.update(&order).await?;

        info!(order_id = %order.id, order_number = %order.order_number, "Order archived");

        Ok(order)
    }

    pub async fn delete_order(&self, id: &str) -> Result<()> {
        let order = self.get_order(id).await?;
        order.ensure_mutable()?;

        if !self.order_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Order {}", id)));
        }

        info!(order_id = %id, order_number = %order.order_number, "Order deleted");

        Ok(())
    }
}

fn normalize_payment_status(value: Option<String>) -> Result<String> {
    match value.map(|s| s.trim().to_string()) {
        None => Ok(DEFAULT_PAYMENT_STATUS.to_string()),
        Some(s) if s.is_empty() => Err(AppError::validation("paymentStatus cannot be empty")),
        Some(s) if s.len() > 32 => Err(AppError::validation(
            "paymentStatus cannot exceed 32 characters",
        )),
        Some(s) => Ok(s),
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
