use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::validate_non_negative;
use crate::core::{AppError, Result};

pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A sellable dish or drink. Orders snapshot its name and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub price: Decimal,
    pub category_id: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl CreateMenuItemRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name, "name")?;
        validate_non_negative(self.price, "price")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl UpdateMenuItemRequest {
    /// Apply the provided fields onto `item`; category existence is checked by the service
    pub fn apply(self, item: &mut MenuItem) -> Result<()> {
        if let Some(name) = self.name {
            validate_name(&name, "name")?;
            item.name = name.trim().to_string();
        }
        if let Some(price) = self.price {
            validate_non_negative(price, "price")?;
            item.price = price;
        }
        if let Some(category_id) = self.category_id {
            item.category_id = category_id;
        }
        if let Some(is_available) = self.is_available {
            item.is_available = is_available;
        }
        Ok(())
    }
}

pub fn validate_name(name: &str, field: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}
