// OrderRepository: MySQL persistence for orders
//
// Order numbers are guarded by the unique index `uq_orders_order_number`.
// An insert that violates it surfaces as `AppError::DuplicateOrderNumber`
// so the order service can regenerate and retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result, TimeWindow};
use crate::modules::orders::models::{Order, OrderFilter, OrderItem};

/// Storage operations the order service and allocator depend on
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All order numbers carrying the given `YYYYMMDD` suffix
    async fn order_numbers_for_date(&self, date_suffix: &str) -> Result<Vec<String>>;

    /// Whether an order number is already taken
    async fn order_number_exists(&self, order_number: &str) -> Result<bool>;

    /// Insert a new order; `DuplicateOrderNumber` on unique-key violation
    async fn insert(&self, order: &Order) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>>;

    /// Orders matching the filter, newest first
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>>;

    /// Persist mutable fields of an existing order
    async fn update(&self, order: &Order) -> Result<()>;

    /// Returns false when no row was deleted
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

pub(crate) const ORDER_COLUMNS: &str = r#"
    id, order_number, order_time, items, total_amount, discount, final_amount,
    status, payment_status, table_number, customer_name, created_by,
    is_archived, created_at, updated_at
"#;

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn order_numbers_for_date(&self, date_suffix: &str) -> Result<Vec<String>> {
        let pattern = format!("^[0-9]+-{}$", date_suffix);

        let numbers = sqlx::query_scalar::<_, String>(
            "SELECT order_number FROM orders WHERE order_number REGEXP ?",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(numbers)
    }

    async fn order_number_exists(&self, order_number: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_number = ?")
                .bind(order_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    async fn insert(&self, order: &Order) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, order_time, items, total_amount, discount,
                final_amount, status, payment_status, table_number, customer_name,
                created_by, is_archived, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(order.order_time)
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(order.discount)
        .bind(order.final_amount)
        .bind(order.status.to_string())
        .bind(&order.payment_status)
        .bind(&order.table_number)
        .bind(&order.customer_name)
        .bind(&order.created_by)
        .bind(order.is_archived)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                return AppError::DuplicateOrderNumber(order.order_number.clone());
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = ?", ORDER_COLUMNS);

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM orders WHERE 1 = 1", ORDER_COLUMNS));

        if let Some(window) = filter.window {
            push_order_time_window(&mut builder, window);
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.to_string());
        }

        builder
            .push(" ORDER BY order_time DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows = builder
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET items = ?, total_amount = ?, discount = ?, final_amount = ?,
                status = ?, payment_status = ?, table_number = ?, customer_name = ?,
                is_archived = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(order.discount)
        .bind(order.final_amount)
        .bind(order.status.to_string())
        .bind(&order.payment_status)
        .bind(&order.table_number)
        .bind(&order.customer_name)
        .bind(order.is_archived)
        .bind(order.updated_at)
        .bind(&order.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order {}", order.id)));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Append an `order_time` range predicate
pub(crate) fn push_order_time_window(builder: &mut QueryBuilder<'_, MySql>, window: TimeWindow) {
    builder.push(" AND order_time >= ").push_bind(window.start);
    if window.end_inclusive {
        builder.push(" AND order_time <= ").push_bind(window.end);
    } else {
        builder.push(" AND order_time < ").push_bind(window.end);
    }
}

// Helper struct for database mapping
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderRow {
    id: String,
    order_number: String,
    order_time: DateTime<Utc>,
    items: Json<Vec<OrderItem>>,
    total_amount: Decimal,
    discount: Decimal,
    final_amount: Decimal,
    status: String,
    payment_status: String,
    table_number: Option<String>,
    customer_name: Option<String>,
    created_by: String,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self> {
        let status = row
            .status
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid status in database: {}", e)))?;

        Ok(Order {
            id: row.id,
            order_number: row.order_number,
            order_time: row.order_time,
            items: row.items.0,
            total_amount: row.total_amount,
            discount: row.discount,
            final_amount: row.final_amount,
            status,
            payment_status: row.payment_status,
            table_number: row.table_number,
            customer_name: row.customer_name,
            created_by: row.created_by,
            is_archived: row.is_archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
