//! Service graph shared by the binary and route-level tests

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::config::Config;
use crate::core::{BusinessClock, Result};
use crate::modules::auth::repositories::{AuthRepository, MySqlAuthRepository};
use crate::modules::auth::services::AuthService;
use crate::modules::cash_notes::repositories::{CashNoteRepository, MySqlCashNoteRepository};
use crate::modules::cash_notes::services::CashNoteService;
use crate::modules::health::InstanceInfo;
use crate::modules::menu::repositories::{MenuRepository, MySqlMenuRepository};
use crate::modules::menu::services::MenuService;
use crate::modules::orders::repositories::{MySqlOrderRepository, OrderRepository};
use crate::modules::orders::services::OrderService;
use crate::modules::receipts::{ReceiptService, ReceiptSink, TcpPrinter};
use crate::modules::reports::models::RevenuePolicy;
use crate::modules::reports::repositories::{MySqlReportRepository, ReportRepository};
use crate::modules::reports::services::ReportService;
use crate::modules::{auth, cash_notes, health, menu, orders, reports};

/// Repository handles the services are built from
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub cash_notes: Arc<dyn CashNoteRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl Repositories {
    pub fn mysql(pool: &MySqlPool) -> Self {
        Self {
            auth: Arc::new(MySqlAuthRepository::new(pool.clone())),
            orders: Arc::new(MySqlOrderRepository::new(pool.clone())),
            cash_notes: Arc::new(MySqlCashNoteRepository::new(pool.clone())),
            menu: Arc::new(MySqlMenuRepository::new(pool.clone())),
            reports: Arc::new(MySqlReportRepository::new(pool.clone())),
        }
    }
}

/// Everything a request handler may extract as app data
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub orders: Arc<OrderService>,
    pub cash_notes: Arc<CashNoteService>,
    pub menu: Arc<MenuService>,
    pub reports: Arc<ReportService>,
    pub receipts: Arc<ReceiptService>,
    pub clock: BusinessClock,
    pub instance: InstanceInfo,
}

/// Knobs the service graph needs beyond its repositories
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub clock: BusinessClock,
    pub session_ttl_hours: u32,
    pub revenue_policy: RevenuePolicy,
    pub store_name: String,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            clock: config.clock()?,
            session_ttl_hours: config.auth.session_ttl_hours,
            revenue_policy: config.reports.revenue_policy,
            store_name: config.printer.store_name.clone(),
        })
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            clock: BusinessClock::utc(),
            session_ttl_hours: 12,
            revenue_policy: RevenuePolicy::AllOrders,
            store_name: "Restaurant".to_string(),
        }
    }
}

impl AppServices {
    pub fn new(
        repos: Repositories,
        settings: ServiceSettings,
        printer: Option<Arc<dyn ReceiptSink>>,
    ) -> Self {
        let clock = settings.clock;
        let receipts = ReceiptService::new(printer, clock, settings.store_name);

        let instance = InstanceInfo {
            timezone: clock.timezone().name().to_string(),
            revenue_policy: settings.revenue_policy.to_string(),
            printer: receipts.printer(),
        };

        Self {
            auth: Arc::new(AuthService::new(repos.auth, settings.session_ttl_hours)),
            orders: Arc::new(OrderService::new(repos.orders, clock)),
            cash_notes: Arc::new(CashNoteService::new(repos.cash_notes)),
            menu: Arc::new(MenuService::new(repos.menu)),
            reports: Arc::new(ReportService::new(
                repos.reports,
                clock,
                settings.revenue_policy,
            )),
            receipts: Arc::new(receipts),
            clock,
            instance,
        }
    }

    /// Build the production graph over MySQL and the configured printer
    pub fn from_config(config: &Config, pool: &MySqlPool) -> Result<Self> {
        let printer = config.printer.address.as_ref().map(|addr| {
            Arc::new(TcpPrinter::new(addr.clone(), config.printer.timeout())) as Arc<dyn ReceiptSink>
        });

        Ok(Self::new(
            Repositories::mysql(pool),
            ServiceSettings::from_config(config)?,
            printer,
        ))
    }

    /// Register app data and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.orders.clone()))
            .app_data(web::Data::new(self.cash_notes.clone()))
            .app_data(web::Data::new(self.menu.clone()))
            .app_data(web::Data::new(self.reports.clone()))
            .app_data(web::Data::new(self.receipts.clone()))
            .app_data(web::Data::new(self.clock))
            .app_data(web::Data::new(self.instance.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                crate::core::AppError::validation(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                crate::core::AppError::validation(err.to_string()).into()
            }))
            .configure(health::controllers::configure)
            .configure(auth::controllers::configure)
            .configure(orders::controllers::configure)
            .configure(cash_notes::controllers::configure)
            .configure(menu::controllers::configure)
            .configure(reports::controllers::configure);
    }
}
