use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::cash_notes::models::CashNote;
use crate::modules::orders::models::Order;

/// Sentinel for `topSellingItem` when the range sold nothing
pub const NO_DATA: &str = "No data";

/// Which orders count as revenue.
///
/// `AllOrders` counts every order placed in range regardless of its payment
/// state. `PaidOnly` counts orders whose `paymentStatus` reads "paid" in any
/// letter case. The choice applies to revenue, order counts, top items and
/// growth alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePolicy {
    #[default]
    AllOrders,
    PaidOnly,
}

impl RevenuePolicy {
    pub fn recognizes(&self, order: &Order) -> bool {
        match self {
            RevenuePolicy::AllOrders => true,
            RevenuePolicy::PaidOnly => order.is_paid(),
        }
    }

    /// Keep only the orders this policy recognizes
    pub fn apply(&self, orders: Vec<Order>) -> Vec<Order> {
        match self {
            RevenuePolicy::AllOrders => orders,
            RevenuePolicy::PaidOnly => orders.into_iter().filter(|o| self.recognizes(o)).collect(),
        }
    }
}

impl std::fmt::Display for RevenuePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevenuePolicy::AllOrders => write!(f, "all_orders"),
            RevenuePolicy::PaidOnly => write!(f, "paid_only"),
        }
    }
}

impl std::str::FromStr for RevenuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all_orders" | "all" => Ok(RevenuePolicy::AllOrders),
            "paid_only" | "paid" => Ok(RevenuePolicy::PaidOnly),
            other => Err(format!(
                "Invalid revenue policy '{}', expected all_orders or paid_only",
                other
            )),
        }
    }
}

/// One calendar day of activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// `YYYY-MM-DD` in the reference timezone
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub orders: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub credits: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub debits: Decimal,
    /// `revenue + credits - debits`
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub total_orders: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_order_value: Decimal,
    pub top_selling_item: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue_growth: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub orders_growth: Decimal,
    /// One-decimal percentage, `"0"` when there is no revenue
    pub profit_margin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_revenue: Decimal,
    pub previous_orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_credits: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_debits: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_cash_flow: Decimal,
    pub credit_transactions: u64,
    pub debit_transactions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeInfo {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub days: i64,
}

/// Response body of `GET /reports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub daily_sales: Vec<DailySales>,
    pub top_items: Vec<TopItem>,
    pub summary: ReportSummary,
    pub cash_flow: CashFlow,
    pub recent_cash_notes: Vec<CashNote>,
    pub date_range: DateRangeInfo,
}

impl SalesReport {
    pub fn is_empty(&self) -> bool {
        self.daily_sales.is_empty()
    }
}
