mod receipt;

pub use receipt::{render_receipt, ReceiptBuilder, DEFAULT_RECEIPT_WIDTH};
