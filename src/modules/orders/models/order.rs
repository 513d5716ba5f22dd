// Order model with totals calculation
//
// An order is one restaurant transaction: a list of line items with per-unit
// price snapshots, a discount, and a day-scoped order number assigned by the
// allocator. Archived orders are immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{round_money, validate_non_negative};
use crate::core::{AppError, Result, TimeWindow};

/// Kitchen/service state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Waiting,
    Paid,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Waiting => write!(f, "Waiting"),
            OrderStatus::Paid => write!(f, "Paid"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "waiting" => Ok(OrderStatus::Waiting),
            "paid" => Ok(OrderStatus::Paid),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

/// Payment status written when none is supplied
pub const DEFAULT_PAYMENT_STATUS: &str = "Pending";

/// One line of an order. `price` is the per-unit price at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Item {} name cannot be empty",
                index
            )));
        }
        if self.name.len() > 100 {
            return Err(AppError::validation(format!(
                "Item {} name cannot exceed 100 characters",
                index
            )));
        }
        if self.quantity == 0 {
            return Err(AppError::validation(format!(
                "Item {} quantity must be at least 1",
                index
            )));
        }
        validate_non_negative(self.price, &format!("Item {} price", index))
    }
}

/// Order totals derived from items and discount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub total_amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

impl OrderTotals {
    /// Validate items and compute `final_amount = total_amount - discount`
    pub fn compute(items: &[OrderItem], discount: Decimal) -> Result<Self> {
        if items.is_empty() {
            return Err(AppError::validation("Order must have at least one item"));
        }

        for (idx, item) in items.iter().enumerate() {
            item.validate(idx)?;
        }
        validate_non_negative(discount, "Discount")?;

        let total_amount = round_money(items.iter().map(OrderItem::line_total).sum());
        let discount = round_money(discount);

        if discount > total_amount {
            return Err(AppError::validation(format!(
                "Discount ({}) cannot exceed order total ({})",
                discount, total_amount
            )));
        }

        Ok(Self {
            total_amount,
            discount,
            final_amount: total_amount - discount,
        })
    }
}

/// A persisted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub order_time: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: String,
    pub table_number: Option<String>,
    pub customer_name: Option<String>,
    pub created_by: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn apply_totals(&mut self, totals: OrderTotals) {
        self.total_amount = totals.total_amount;
        self.discount = totals.discount;
        self.final_amount = totals.final_amount;
    }

    /// Archived orders reject every mutation
    pub fn ensure_mutable(&self) -> Result<()> {
        if self.is_archived {
            return Err(AppError::validation(format!(
                "Order {} is archived and cannot be modified",
                self.order_number
            )));
        }
        Ok(())
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.eq_ignore_ascii_case("paid")
    }
}

/// Request body for POST /orders
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// Request body for PUT /orders/{id}; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// Filters for listing orders
#[derive(Debug, Clone)]
pub struct OrderFilter {
    pub window: Option<TimeWindow>,
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            window: None,
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}
