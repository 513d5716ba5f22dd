pub mod report_aggregator;
pub mod report_service;

pub use report_service::ReportService;
