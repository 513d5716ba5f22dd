use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{Result, TimeWindow};
use crate::modules::cash_notes::models::CashNote;
use crate::modules::cash_notes::repositories::cash_note_repository::{
    push_note_date_window, CashNoteRow, CASH_NOTE_COLUMNS,
};
use crate::modules::orders::models::Order;
use crate::modules::orders::repositories::order_repository::{
    push_order_time_window, OrderRow, ORDER_COLUMNS,
};

/// Read-only range queries backing the sales report
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Orders whose `order_time` falls inside the window
    async fn orders_between(&self, window: TimeWindow) -> Result<Vec<Order>>;

    /// Cash notes whose ledger date falls inside the window
    async fn cash_notes_between(&self, window: TimeWindow) -> Result<Vec<CashNote>>;
}

pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn orders_between(&self, window: TimeWindow) -> Result<Vec<Order>> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM orders WHERE 1 = 1", ORDER_COLUMNS));
        push_order_time_window(&mut builder, window);
        builder.push(" ORDER BY order_time ASC, order_number ASC");

        let rows = builder
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn cash_notes_between(&self, window: TimeWindow) -> Result<Vec<CashNote>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM cash_notes WHERE 1 = 1",
            CASH_NOTE_COLUMNS
        ));
        push_note_date_window(&mut builder, window);
        builder.push(" ORDER BY note_date ASC");

        let rows = builder
            .build_query_as::<CashNoteRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CashNote::try_from).collect()
    }
}
