use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{BusinessClock, Result};
use crate::modules::reports::models::{ReportRange, RevenuePolicy, SalesReport};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::report_aggregator::build_report;

/// Service for generating sales reports
pub struct ReportService {
    report_repo: Arc<dyn ReportRepository>,
    clock: BusinessClock,
    policy: RevenuePolicy,
}

impl ReportService {
    pub fn new(
        report_repo: Arc<dyn ReportRepository>,
        clock: BusinessClock,
        policy: RevenuePolicy,
    ) -> Self {
        Self {
            report_repo,
            clock,
            policy,
        }
    }

    pub fn clock(&self) -> BusinessClock {
        self.clock
    }

    pub fn policy(&self) -> RevenuePolicy {
        self.policy
    }

    /// Generate the sales report for a resolved range.
    ///
    /// Reads the range's orders and cash notes plus the previous period's
    /// orders. Any storage failure fails the whole report; partial results
    /// are never returned.
    pub async fn generate_report(&self, range: &ReportRange) -> Result<SalesReport> {
        let window = range.window();
        let previous_window = range.previous_window(&self.clock);

        let orders = self.report_repo.orders_between(window).await?;
        let notes = self.report_repo.cash_notes_between(window).await?;
        let previous_orders = self.report_repo.orders_between(previous_window).await?;

        debug!(
            orders = orders.len(),
            notes = notes.len(),
            previous_orders = previous_orders.len(),
            policy = %self.policy,
            "Fetched report rows"
        );

        let orders = self.policy.apply(orders);
        let previous_orders = self.policy.apply(previous_orders);

        let report = build_report(range, &orders, &notes, &previous_orders, &self.clock);

        info!(
            from = %range.from,
            to = %range.to,
            days = range.days,
            total_revenue = %report.summary.total_revenue,
            total_orders = report.summary.total_orders,
            "Generated sales report"
        );

        Ok(report)
    }
}
