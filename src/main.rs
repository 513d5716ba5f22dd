use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use sqlx::MySqlPool;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use restaurant_pos::config::{Config, DatabaseConfig};
use restaurant_pos::middleware::SessionAuth;
use restaurant_pos::AppServices;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(&config.app.log_format);

    config.validate().context("Configuration validation failed")?;

    tracing::info!(
        env = %config.app.env,
        timezone = %config.app.timezone,
        revenue_policy = %config.reports.revenue_policy,
        "Starting restaurant POS back office"
    );

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        pool_size = config.database.pool_size,
        max_connections = config.database.max_connections,
        "Database pool initialized"
    );

    DatabaseConfig::run_migrations(&db_pool)
        .await
        .context("Failed to apply migrations")?;

    let services = AppServices::from_config(&config, &db_pool)?;

    if let Some(password) = &config.auth.bootstrap_admin_password {
        services
            .auth
            .ensure_bootstrap_admin(&config.auth.bootstrap_admin_username, password)
            .await
            .context("Failed to create bootstrap admin")?;
    }

    match services.receipts.printer() {
        Some(printer) => tracing::info!(printer = %printer, "Receipt printer configured"),
        None => tracing::warn!("No receipt printer configured; printing is disabled"),
    }

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let cors_origin = config.server.cors_origin.clone();
    let pool: MySqlPool = db_pool.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(pool.clone()))
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone()))
            .wrap(build_cors(cors_origin.as_deref()))
            .wrap(TracingLogger::default())
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "restaurant_pos=debug,actix_web=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}
