mod date_range;
mod report;

pub use date_range::{RangeSelector, ReportRange, MAX_RANGE_MONTHS};
pub use report::{
    CashFlow, DailySales, DateRangeInfo, ReportSummary, RevenuePolicy, SalesReport, TopItem,
    NO_DATA,
};
