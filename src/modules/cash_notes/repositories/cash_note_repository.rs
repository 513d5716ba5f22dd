use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result, TimeWindow};
use crate::modules::cash_notes::models::{CashNote, CashNoteFilter};

#[async_trait]
pub trait CashNoteRepository: Send + Sync {
    async fn insert(&self, note: &CashNote) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<CashNote>>;

    /// Notes matching the filter, newest ledger date first
    async fn list(&self, filter: &CashNoteFilter) -> Result<Vec<CashNote>>;

    async fn update(&self, note: &CashNote) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct MySqlCashNoteRepository {
    pool: MySqlPool,
}

impl MySqlCashNoteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

pub(crate) const CASH_NOTE_COLUMNS: &str =
    "id, note_type, amount, description, note_date, created_by, created_at";

#[async_trait]
impl CashNoteRepository for MySqlCashNoteRepository {
    async fn insert(&self, note: &CashNote) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cash_notes (id, note_type, amount, description, note_date, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&note.id)
        .bind(note.note_type.to_string())
        .bind(note.amount)
        .bind(&note.description)
        .bind(note.date)
        .bind(&note.created_by)
        .bind(note.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CashNote>> {
        let sql = format!("SELECT {} FROM cash_notes WHERE id = ?", CASH_NOTE_COLUMNS);

        let row = sqlx::query_as::<_, CashNoteRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CashNote::try_from).transpose()
    }

    async fn list(&self, filter: &CashNoteFilter) -> Result<Vec<CashNote>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM cash_notes WHERE 1 = 1",
            CASH_NOTE_COLUMNS
        ));

        if let Some(window) = filter.window {
            push_note_date_window(&mut builder, window);
        }

        builder
            .push(" ORDER BY note_date DESC, created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows = builder
            .build_query_as::<CashNoteRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CashNote::try_from).collect()
    }

    async fn update(&self, note: &CashNote) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE cash_notes
            SET note_type = ?, amount = ?, description = ?, note_date = ?
            WHERE id = ?
            "#,
        )
        .bind(note.note_type.to_string())
        .bind(note.amount)
        .bind(&note.description)
        .bind(note.date)
        .bind(&note.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Cash note {}", note.id)));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cash_notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Append a `note_date` range predicate
pub(crate) fn push_note_date_window(builder: &mut QueryBuilder<'_, MySql>, window: TimeWindow) {
    builder.push(" AND note_date >= ").push_bind(window.start);
    if window.end_inclusive {
        builder.push(" AND note_date <= ").push_bind(window.end);
    } else {
        builder.push(" AND note_date < ").push_bind(window.end);
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CashNoteRow {
    id: String,
    note_type: String,
    amount: Decimal,
    description: String,
    note_date: DateTime<Utc>,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CashNoteRow> for CashNote {
    type Error = AppError;

    fn try_from(row: CashNoteRow) -> Result<Self> {
        let note_type = row
            .note_type
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid cash note type in database: {}", e)))?;

        Ok(CashNote {
            id: row.id,
            note_type,
            amount: row.amount,
            description: row.description,
            date: row.note_date,
            created_by: row.created_by,
            created_at: row.created_at,
        })
    }
}
