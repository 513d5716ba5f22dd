mod cash_note;

pub use cash_note::{
    CashNote, CashNoteFilter, CashNoteType, CreateCashNoteRequest, UpdateCashNoteRequest,
    MAX_DESCRIPTION_LEN,
};
