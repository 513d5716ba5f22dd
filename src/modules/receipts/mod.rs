// Receipt printing module

pub mod models;
pub mod services;

pub use services::{ReceiptService, ReceiptSink, TcpPrinter};
