pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ReportRange, RevenuePolicy, SalesReport};
pub use repositories::ReportRepository;
pub use services::ReportService;
