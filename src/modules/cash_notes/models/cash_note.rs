use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::validate_non_negative;
use crate::core::{AppError, Result, TimeWindow};

pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Direction of a manual ledger entry. The sign lives here, never in the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashNoteType {
    Credit,
    Debit,
}

impl std::fmt::Display for CashNoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CashNoteType::Credit => write!(f, "credit"),
            CashNoteType::Debit => write!(f, "debit"),
        }
    }
}

impl std::str::FromStr for CashNoteType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit" => Ok(CashNoteType::Credit),
            "debit" => Ok(CashNoteType::Debit),
            _ => Err(format!("Invalid cash note type: {}", s)),
        }
    }
}

/// Manual cash ledger entry outside of orders (tips, supplier payments, petty cash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashNote {
    pub id: String,
    #[serde(rename = "type")]
    pub note_type: CashNoteType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    /// Ledger date; may be backdated
    pub date: DateTime<Utc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl CashNote {
    pub fn is_credit(&self) -> bool {
        self.note_type == CashNoteType::Credit
    }
}

/// Request body for POST /cash-notes
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCashNoteRequest {
    #[serde(rename = "type")]
    pub note_type: CashNoteType,
    pub amount: Decimal,
    pub description: String,
    /// Defaults to the creation instant
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl CreateCashNoteRequest {
    pub fn validate(&self) -> Result<()> {
        validate_non_negative(self.amount, "amount")?;
        validate_description(&self.description)
    }
}

/// Request body for PUT /cash-notes/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCashNoteRequest {
    #[serde(default, rename = "type")]
    pub note_type: Option<CashNoteType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl UpdateCashNoteRequest {
    /// Apply the provided fields onto `note`
    pub fn apply(self, note: &mut CashNote) -> Result<()> {
        if let Some(amount) = self.amount {
            validate_non_negative(amount, "amount")?;
            note.amount = amount;
        }
        if let Some(description) = self.description {
            validate_description(&description)?;
            note.description = description.trim().to_string();
        }
        if let Some(note_type) = self.note_type {
            note.note_type = note_type;
        }
        if let Some(date) = self.date {
            note.date = date;
        }
        Ok(())
    }
}

/// Filters for listing cash notes
#[derive(Debug, Clone)]
pub struct CashNoteFilter {
    pub window: Option<TimeWindow>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for CashNoteFilter {
    fn default() -> Self {
        Self {
            window: None,
            limit: 50,
            offset: 0,
        }
    }
}

fn validate_description(description: &str) -> Result<()> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("description is required"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::validation(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}
