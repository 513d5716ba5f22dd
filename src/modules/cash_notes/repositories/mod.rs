pub mod cash_note_repository;

pub use cash_note_repository::{CashNoteRepository, MySqlCashNoteRepository};
