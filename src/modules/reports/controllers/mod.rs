mod report_controller;

pub use report_controller::{get_report, ReportQuery};

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    report_controller::configure_routes(cfg);
}
