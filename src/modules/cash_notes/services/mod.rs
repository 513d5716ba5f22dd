pub mod cash_note_service;

pub use cash_note_service::CashNoteService;
