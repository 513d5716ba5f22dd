pub mod receipt_service;
pub mod receipt_sink;

pub use receipt_service::ReceiptService;
pub use receipt_sink::{ReceiptSink, TcpPrinter};
