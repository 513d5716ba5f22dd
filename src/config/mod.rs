use crate::core::{AppError, BusinessClock, Result};
use crate::modules::reports::models::RevenuePolicy;
use std::env;
use std::time::Duration;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub printer: PrinterConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_format: String,
    /// IANA name of the restaurant's reference timezone
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl_hours: u32,
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// `host:port` of the receipt printer; printing is disabled when unset
    pub address: Option<String>,
    pub timeout_secs: u64,
    pub store_name: String,
}

#[derive(Debug, Clone)]
pub struct ReportsConfig {
    pub revenue_policy: RevenuePolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
                timezone: env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            auth: AuthConfig {
                session_ttl_hours: parse_var("SESSION_TTL_HOURS", "12")?,
                bootstrap_admin_username: env::var("BOOTSTRAP_ADMIN_USERNAME")
                    .unwrap_or_else(|_| "admin".to_string()),
                bootstrap_admin_password: env::var("BOOTSTRAP_ADMIN_PASSWORD")
                    .ok()
                    .filter(|p| !p.is_empty()),
            },
            printer: PrinterConfig {
                address: env::var("PRINTER_ADDR").ok().filter(|a| !a.is_empty()),
                timeout_secs: parse_var("PRINTER_TIMEOUT_SECS", "5")?,
                store_name: env::var("STORE_NAME").unwrap_or_else(|_| "Restaurant".to_string()),
            },
            reports: ReportsConfig {
                revenue_policy: env::var("REPORT_REVENUE_POLICY")
                    .unwrap_or_else(|_| "all_orders".to_string())
                    .parse()
                    .map_err(AppError::Configuration)?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.session_ttl_hours == 0 {
            return Err(AppError::Configuration(
                "Session TTL must be greater than 0".to_string(),
            ));
        }

        if self.printer.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Printer timeout must be greater than 0".to_string(),
            ));
        }

        if self.database.max_connections < self.database.pool_size {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be at least DATABASE_POOL_SIZE".to_string(),
            ));
        }

        self.clock()?;

        Ok(())
    }

    /// Reference-timezone clock for order numbers and reports
    pub fn clock(&self) -> Result<BusinessClock> {
        BusinessClock::from_name(&self.app.timezone)
    }
}

impl PrinterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", name)))
}
