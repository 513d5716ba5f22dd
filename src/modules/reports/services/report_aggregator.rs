//! Pure aggregation over fetched orders and cash notes.
//!
//! Nothing here touches storage; the report service fetches rows and hands
//! them over, which keeps every figure reproducible from plain vectors.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::money::{percent_change, round_one_decimal, round_whole};
use crate::core::timezone::iso_date;
use crate::core::BusinessClock;
use crate::modules::cash_notes::models::{CashNote, CashNoteType};
use crate::modules::orders::models::Order;
use crate::modules::reports::models::{
    CashFlow, DailySales, DateRangeInfo, ReportRange, ReportSummary, SalesReport, TopItem, NO_DATA,
};

pub const TOP_ITEMS_LIMIT: usize = 10;
pub const RECENT_NOTES_LIMIT: usize = 10;

#[derive(Default)]
struct DayTotals {
    revenue: Decimal,
    orders: u64,
    credits: Decimal,
    debits: Decimal,
}

/// One row per calendar day touched by an order or a note, ascending by date
pub fn daily_sales(orders: &[Order], notes: &[CashNote], clock: &BusinessClock) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();

    for order in orders {
        let day = days.entry(clock.date_of(order.order_time)).or_default();
        day.revenue += order.final_amount;
        day.orders += 1;
    }

    for note in notes {
        let day = days.entry(clock.date_of(note.date)).or_default();
        match note.note_type {
            CashNoteType::Credit => day.credits += note.amount,
            CashNoteType::Debit => day.debits += note.amount,
        }
    }

    // netProfit is derived only once every order and note has been counted
    days.into_iter()
        .map(|(date, t)| DailySales {
            date: iso_date(date),
            net_profit: t.revenue + t.credits - t.debits,
            revenue: t.revenue,
            orders: t.orders,
            credits: t.credits,
            debits: t.debits,
        })
        .collect()
}

/// Best sellers by revenue; equal revenues keep first-seen order
pub fn top_items(orders: &[Order], limit: usize) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in orders.iter().flat_map(|o| o.items.iter()) {
        let slot = *index.entry(item.name.as_str()).or_insert_with(|| {
            items.push(TopItem {
                name: item.name.clone(),
                quantity: 0,
                revenue: Decimal::ZERO,
            });
            items.len() - 1
        });

        items[slot].quantity += u64::from(item.quantity);
        items[slot].revenue += item.line_total();
    }

    // sort_by is stable
    items.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    items.truncate(limit);
    items
}

pub fn cash_flow(notes: &[CashNote]) -> CashFlow {
    let mut flow = CashFlow {
        total_credits: Decimal::ZERO,
        total_debits: Decimal::ZERO,
        net_cash_flow: Decimal::ZERO,
        credit_transactions: 0,
        debit_transactions: 0,
    };

    for note in notes {
        match note.note_type {
            CashNoteType::Credit => {
                flow.total_credits += note.amount;
                flow.credit_transactions += 1;
            }
            CashNoteType::Debit => {
                flow.total_debits += note.amount;
                flow.debit_transactions += 1;
            }
        }
    }

    flow.net_cash_flow = flow.total_credits - flow.total_debits;
    flow
}

/// Latest ledger entries first
pub fn recent_cash_notes(notes: &[CashNote], limit: usize) -> Vec<CashNote> {
    let mut recent = notes.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    recent.truncate(limit);
    recent
}

/// Headline figures plus growth against the previous period
pub fn summarize(
    orders: &[Order],
    previous_orders: &[Order],
    top_items: &[TopItem],
    cash_flow: &CashFlow,
) -> ReportSummary {
    let total_revenue: Decimal = orders.iter().map(|o| o.final_amount).sum();
    let total_orders = orders.len() as u64;

    let average_order_value = if total_orders == 0 {
        Decimal::ZERO
    } else {
        round_whole(total_revenue / Decimal::from(total_orders))
    };

    let previous_revenue: Decimal = previous_orders.iter().map(|o| o.final_amount).sum();
    let previous_count = previous_orders.len() as u64;

    let net_profit = total_revenue + cash_flow.total_credits - cash_flow.total_debits;

    ReportSummary {
        total_revenue,
        total_orders,
        average_order_value,
        top_selling_item: top_items
            .first()
            .map(|item| item.name.clone())
            .unwrap_or_else(|| NO_DATA.to_string()),
        revenue_growth: percent_change(total_revenue, previous_revenue),
        orders_growth: percent_change(Decimal::from(total_orders), Decimal::from(previous_count)),
        profit_margin: profit_margin(net_profit, total_revenue),
        net_profit,
        previous_revenue,
        previous_orders: previous_count,
    }
}

/// `netProfit / totalRevenue * 100` with one decimal, `"0"` without revenue
pub fn profit_margin(net_profit: Decimal, total_revenue: Decimal) -> String {
    if total_revenue.is_zero() {
        return "0".to_string();
    }
    let margin = round_one_decimal(net_profit / total_revenue * Decimal::ONE_HUNDRED);
    format!("{:.1}", margin)
}

/// Assemble the full report from rows already filtered by revenue policy
pub fn build_report(
    range: &ReportRange,
    orders: &[Order],
    notes: &[CashNote],
    previous_orders: &[Order],
    clock: &BusinessClock,
) -> SalesReport {
    let top = top_items(orders, TOP_ITEMS_LIMIT);
    let flow = cash_flow(notes);

    SalesReport {
        daily_sales: daily_sales(orders, notes, clock),
        summary: summarize(orders, previous_orders, &top, &flow),
        top_items: top,
        cash_flow: flow,
        recent_cash_notes: recent_cash_notes(notes, RECENT_NOTES_LIMIT),
        date_range: DateRangeInfo {
            from: range.from,
            to: range.to,
            days: range.days,
        },
    }
}
