use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::core::Result;
use crate::modules::reports::models::ReportRange;
use crate::modules::reports::services::ReportService;

/// Query parameters for the sales report endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// `today | 7days | 30days | 90days | 6months | 1year | custom`
    pub range: Option<String>,
    /// Inclusive first day, YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive last day, YYYY-MM-DD
    pub end_date: Option<String>,
}

/// GET /reports
///
/// Resolves the range before any storage access; a bad range is a 400.
pub async fn get_report(
    service: web::Data<Arc<ReportService>>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let range = ReportRange::resolve(
        query.range.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        &service.clock(),
        Utc::now(),
    )?;

    let report = service.generate_report(&range).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure report routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports", web::get().to(get_report));
}
