//! Restaurant point-of-sale back office
//!
//! Order entry with per-day order numbers, a manual cash ledger, menu
//! management, receipt printing and sales reporting over a MySQL store.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::{AppServices, Repositories, ServiceSettings};
pub use modules::cash_notes;
pub use modules::orders;
pub use modules::reports;
