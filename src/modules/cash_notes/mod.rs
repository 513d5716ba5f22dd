// Cash notes module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CashNote, CashNoteType};
pub use repositories::CashNoteRepository;
pub use services::CashNoteService;
