pub mod auth;
pub mod cash_notes;
pub mod health;
pub mod menu;
pub mod orders;
pub mod receipts;
pub mod reports;
