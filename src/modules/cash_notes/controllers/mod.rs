pub mod cash_note_controller;

pub use cash_note_controller::configure;
