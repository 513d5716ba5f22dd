use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::menu::models::{
    validate_name, Category, CreateMenuItemRequest, MenuItem, UpdateMenuItemRequest,
};
use crate::modules::menu::repositories::MenuRepository;

/// Service for menu categories and items
pub struct MenuService {
    repo: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        validate_name(name, "name")?;

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };
        self.repo.insert_category(&category).await?;

        info!(category_id = %category.id, name = %category.name, "Created category");
        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.repo.list_categories().await
    }

    pub async fn rename_category(&self, id: &str, name: &str) -> Result<Category> {
        validate_name(name, "name")?;
        self.repo.rename_category(id, name.trim()).await?;

        self.repo
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {}", id)))
    }

    /// Delete a category that no menu item references
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let in_use = self.repo.count_items_in_category(id).await?;
        if in_use > 0 {
            return Err(AppError::validation(format!(
                "Category still has {} menu item(s)",
                in_use
            )));
        }

        if !self.repo.delete_category(id).await? {
            return Err(AppError::not_found(format!("Category {}", id)));
        }
        info!(category_id = %id, "Deleted category");
        Ok(())
    }

    pub async fn create_item(&self, request: CreateMenuItemRequest) -> Result<MenuItem> {
        request.validate()?;
        self.ensure_category(&request.category_id).await?;

        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            price: request.price,
            category_id: request.category_id,
            is_available: request.is_available,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert_item(&item).await?;

        info!(item_id = %item.id, name = %item.name, price = %item.price, "Created menu item");
        Ok(item)
    }

    pub async fn get_item(&self, id: &str) -> Result<MenuItem> {
        self.repo
            .find_item(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))
    }

    pub async fn list_items(&self, category_id: Option<&str>) -> Result<Vec<MenuItem>> {
        self.repo.list_items(category_id).await
    }

    pub async fn update_item(&self, id: &str, request: UpdateMenuItemRequest) -> Result<MenuItem> {
        let mut item = self.get_item(id).await?;

        if let Some(category_id) = &request.category_id {
            self.ensure_category(category_id).await?;
        }
        request.apply(&mut item)?;
        item.updated_at = Utc::now();

        self.repo.update_item(&item).await?;
        Ok(item)
    }

    pub async fn delete_item(&self, id: &str) -> Result<()> {
        if !self.repo.delete_item(id).await? {
            return Err(AppError::not_found(format!("Menu item {}", id)));
        }
        info!(item_id = %id, "Deleted menu item");
        Ok(())
    }

    async fn ensure_category(&self, category_id: &str) -> Result<()> {
        match self.repo.find_category(category_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::validation(format!(
                "Category {} does not exist",
                category_id
            ))),
        }
    }
}
