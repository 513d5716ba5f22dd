use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result};
use crate::modules::menu::models::{Category, MenuItem};

/// Persistence for categories and menu items
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn insert_category(&self, category: &Category) -> Result<()>;

    async fn find_category(&self, id: &str) -> Result<Option<Category>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn rename_category(&self, id: &str, name: &str) -> Result<()>;

    async fn delete_category(&self, id: &str) -> Result<bool>;

    async fn count_items_in_category(&self, category_id: &str) -> Result<i64>;

    async fn insert_item(&self, item: &MenuItem) -> Result<()>;

    async fn find_item(&self, id: &str) -> Result<Option<MenuItem>>;

    /// Items ordered by name, optionally restricted to one category
    async fn list_items(&self, category_id: Option<&str>) -> Result<Vec<MenuItem>>;

    async fn update_item(&self, item: &MenuItem) -> Result<()>;

    async fn delete_item(&self, id: &str) -> Result<bool>;
}

pub struct MySqlMenuRepository {
    pool: MySqlPool,
}

impl MySqlMenuRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str = "id, name, price, category_id, is_available, created_at, updated_at";

fn category_conflict(name: &str, e: sqlx::Error) -> AppError {
    if AppError::is_unique_violation(&e) {
        return AppError::validation(format!("Category '{}' already exists", name));
    }
    AppError::Database(e)
}

#[async_trait]
impl MenuRepository for MySqlMenuRepository {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| category_conflict(&category.name, e))?;

        Ok(())
    }

    async fn find_category(&self, id: &str) -> Result<Option<Category>> {
        let row: Option<(String, String, DateTime<Utc>)> =
            sqlx::query_as("SELECT id, name, created_at FROM categories WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, name, created_at)| Category {
            id,
            name,
            created_at,
        }))
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows: Vec<(String, String, DateTime<Utc>)> =
            sqlx::query_as("SELECT id, name, created_at FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, created_at)| Category {
                id,
                name,
                created_at,
            })
            .collect())
    }

    async fn rename_category(&self, id: &str, name: &str) -> Result<()> {
        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| category_conflict(name, e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Category {}", id)));
        }
        Ok(())
    }

    async fn delete_category(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_items_in_category(&self, category_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE category_id = ?")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn insert_item(&self, item: &MenuItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price, category_id, is_available, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.category_id)
        .bind(item.is_available)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_item(&self, id: &str) -> Result<Option<MenuItem>> {
        let sql = format!("SELECT {} FROM menu_items WHERE id = ?", ITEM_COLUMNS);

        let row = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(MenuItem::from))
    }

    async fn list_items(&self, category_id: Option<&str>) -> Result<Vec<MenuItem>> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM menu_items WHERE 1 = 1", ITEM_COLUMNS));

        if let Some(category_id) = category_id {
            builder.push(" AND category_id = ").push_bind(category_id);
        }
        builder.push(" ORDER BY name");

        let rows = builder
            .build_query_as::<MenuItemRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn update_item(&self, item: &MenuItem) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET name = ?, price = ?, category_id = ?, is_available = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.category_id)
        .bind(item.is_available)
        .bind(item.updated_at)
        .bind(&item.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Menu item {}", item.id)));
        }
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    name: String,
    price: Decimal,
    category_id: String,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            price: row.price,
            category_id: row.category_id,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
