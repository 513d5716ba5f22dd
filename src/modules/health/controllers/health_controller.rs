use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::core::timezone::format_iso8601;

/// Static facts about the running instance reported by `/ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    pub timezone: String,
    pub revenue_policy: String,
    pub printer: Option<String>,
}

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
    pub instance: Option<InstanceInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub database: bool,
    pub application: bool,
}

/// GET /health - Liveness probe
/// Does not check dependencies
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: format_iso8601(chrono::Utc::now()),
        service: env!("CARGO_PKG_NAME").to_string(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Checks database connectivity
pub async fn readiness_check(
    pool: Option<web::Data<MySqlPool>>,
    instance: Option<web::Data<InstanceInfo>>,
) -> impl Responder {
    let mut checks = ReadinessChecks {
        database: false,
        application: true,
    };

    match pool {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
            Ok(_) => checks.database = true,
            Err(e) => tracing::error!(error = %e, "Database readiness check failed"),
        },
        None => tracing::warn!("Readiness check without a database pool"),
    }

    let ready = checks.database && checks.application;
    let response = ReadinessResponse {
        ready,
        checks,
        instance: instance.map(|info| info.get_ref().clone()),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
