//! Aggregation over plain order and cash-note vectors

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::{note_at, order_at, simple_order, utc, utc_clock};
use proptest::prelude::*;
use restaurant_pos::core::BusinessClock;
use restaurant_pos::modules::cash_notes::models::CashNoteType;
use restaurant_pos::modules::orders::models::OrderItem;
use restaurant_pos::modules::reports::models::NO_DATA;
use restaurant_pos::modules::reports::services::report_aggregator::{
    cash_flow, daily_sales, recent_cash_notes, summarize, top_items, TOP_ITEMS_LIMIT,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_single_day_scenario() {
    let orders = vec![
        simple_order("1-20250920", utc(2025, 9, 20, 11, 0), "Nasi Goreng", dec!(100)),
        simple_order("2-20250920", utc(2025, 9, 20, 13, 0), "Sate", dec!(150)),
    ];
    let notes = vec![note_at(CashNoteType::Debit, dec!(20), utc(2025, 9, 20, 9, 0))];

    let rows = daily_sales(&orders, &notes, &utc_clock());

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.date, "2025-09-20");
    assert_eq!(row.revenue, dec!(250));
    assert_eq!(row.orders, 2);
    assert_eq!(row.debits, dec!(20));
    assert_eq!(row.credits, dec!(0));
    assert_eq!(row.net_profit, dec!(230));
}

#[test]
fn test_note_only_day_gets_a_row() {
    let orders = vec![simple_order("1-20250920", utc(2025, 9, 20, 11, 0), "Sate", dec!(50))];
    let notes = vec![
        note_at(CashNoteType::Credit, dec!(30), utc(2025, 9, 18, 9, 0)),
        note_at(CashNoteType::Debit, dec!(5), utc(2025, 9, 18, 17, 0)),
    ];

    let rows = daily_sales(&orders, &notes, &utc_clock());

    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-09-18", "2025-09-20"]);
    assert_eq!(rows[0].orders, 0);
    assert_eq!(rows[0].net_profit, dec!(25));
}

#[test]
fn test_days_follow_reference_timezone() {
    let clock = BusinessClock::from_name("Asia/Jakarta").unwrap();
    // 18:00 UTC on the 19th is 01:00 on the 20th in Jakarta
    let orders = vec![simple_order("1-20250920", utc(2025, 9, 19, 18, 0), "Sate", dec!(10))];

    let rows = daily_sales(&orders, &[], &clock);

    assert_eq!(rows[0].date, "2025-09-20");
}

#[test]
fn test_top_items_rank_by_revenue_and_cap_at_ten() {
    let mut orders = Vec::new();
    for i in 0..12u32 {
        let price = Decimal::from(10 + i);
        orders.push(order_at(
            &format!("{}-20250920", i + 1),
            utc(2025, 9, 20, 10, i),
            vec![OrderItem::new(format!("Dish {}", i), 2, price)],
            price * Decimal::from(2),
        ));
    }

    let top = top_items(&orders, TOP_ITEMS_LIMIT);

    assert_eq!(top.len(), 10);
    assert_eq!(top[0].name, "Dish 11");
    assert_eq!(top[0].quantity, 2);
    assert_eq!(top[0].revenue, dec!(42));
    assert!(top.windows(2).all(|w| w[0].revenue >= w[1].revenue));
}

#[test]
fn test_top_items_merge_by_name_and_keep_first_seen_on_ties() {
    let orders = vec![
        order_at(
            "1-20250920",
            utc(2025, 9, 20, 10, 0),
            vec![
                OrderItem::new("Es Teh", 2, dec!(5)),
                OrderItem::new("Kopi", 1, dec!(10)),
            ],
            dec!(20),
        ),
        order_at(
            "2-20250920",
            utc(2025, 9, 20, 11, 0),
            vec![OrderItem::new("Es Teh", 1, dec!(5))],
            dec!(5),
        ),
    ];

    let top = top_items(&orders, TOP_ITEMS_LIMIT);

    assert_eq!(top[0].name, "Es Teh");
    assert_eq!(top[0].quantity, 3);
    assert_eq!(top[0].revenue, dec!(15));
    assert_eq!(top[1].name, "Kopi");

    // Equal revenue: the earlier name stays first
    let tied = vec![order_at(
        "3-20250920",
        utc(2025, 9, 20, 12, 0),
        vec![OrderItem::new("B", 1, dec!(10)), OrderItem::new("A", 1, dec!(10))],
        dec!(20),
    )];
    let names: Vec<String> = top_items(&tied, TOP_ITEMS_LIMIT)
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn test_summary_with_growth() {
    let orders = vec![
        simple_order("1-20250920", utc(2025, 9, 20, 10, 0), "Sate", dec!(100)),
        simple_order("2-20250920", utc(2025, 9, 20, 11, 0), "Sate", dec!(101)),
    ];
    let previous = vec![simple_order("1-20250913", utc(2025, 9, 13, 10, 0), "Sate", dec!(150))];
    let notes = vec![note_at(CashNoteType::Debit, dec!(1), utc(2025, 9, 20, 9, 0))];

    let top = top_items(&orders, TOP_ITEMS_LIMIT);
    let flow = cash_flow(&notes);
    let summary = summarize(&orders, &previous, &top, &flow);

    assert_eq!(summary.total_revenue, dec!(201));
    assert_eq!(summary.total_orders, 2);
    // 100.5 rounds half away from zero
    assert_eq!(summary.average_order_value, dec!(101));
    assert_eq!(summary.top_selling_item, "Sate");
    assert_eq!(summary.revenue_growth, dec!(34.0));
    assert_eq!(summary.orders_growth, dec!(100.0));
    assert_eq!(summary.net_profit, dec!(200));
    assert_eq!(summary.profit_margin, "99.5");
    assert_eq!(summary.previous_revenue, dec!(150));
    assert_eq!(summary.previous_orders, 1);
}

#[test]
fn test_empty_range_summary() {
    let summary = summarize(&[], &[], &[], &cash_flow(&[]));

    assert_eq!(summary.total_revenue, Decimal::ZERO);
    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.average_order_value, Decimal::ZERO);
    assert_eq!(summary.top_selling_item, NO_DATA);
    assert_eq!(summary.profit_margin, "0");
    assert_eq!(summary.revenue_growth, Decimal::ZERO);
}

#[test]
fn test_growth_from_zero_base_is_zero() {
    let orders = vec![simple_order("1-20250920", utc(2025, 9, 20, 10, 0), "Sate", dec!(80))];
    let summary = summarize(&orders, &[], &top_items(&orders, 10), &cash_flow(&[]));

    assert_eq!(summary.revenue_growth, Decimal::ZERO);
    assert_eq!(summary.orders_growth, Decimal::ZERO);
}

#[test]
fn test_cash_flow_counts_by_type() {
    let notes = vec![
        note_at(CashNoteType::Credit, dec!(40), utc(2025, 9, 20, 9, 0)),
        note_at(CashNoteType::Credit, dec!(10), utc(2025, 9, 20, 10, 0)),
        note_at(CashNoteType::Debit, dec!(15), utc(2025, 9, 20, 11, 0)),
    ];

    let flow = cash_flow(&notes);

    assert_eq!(flow.total_credits, dec!(50));
    assert_eq!(flow.total_debits, dec!(15));
    assert_eq!(flow.net_cash_flow, dec!(35));
    assert_eq!(flow.credit_transactions, 2);
    assert_eq!(flow.debit_transactions, 1);
}

#[test]
fn test_recent_notes_newest_first_and_capped() {
    let notes: Vec<_> = (0..12u32)
        .map(|d| note_at(CashNoteType::Debit, dec!(1), utc(2025, 9, 1 + d, 9, 0)))
        .collect();

    let recent = recent_cash_notes(&notes, 10);

    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].date, utc(2025, 9, 12, 9, 0));
    assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    /// Daily rows add up to the range totals, and every row keeps
    /// netProfit = revenue + credits - debits
    #[test]
    fn prop_daily_rows_are_complete(
        order_specs in prop::collection::vec((0u32..7, 0u32..24, arb_amount()), 0..30),
        note_specs in prop::collection::vec((0u32..7, any::<bool>(), arb_amount()), 0..20),
    ) {
        let orders: Vec<_> = order_specs
            .iter()
            .enumerate()
            .map(|(i, (day, hour, amount))| {
                simple_order(&format!("{}-x", i), utc(2025, 9, 14 + day, *hour, 0), "Dish", *amount)
            })
            .collect();
        let notes: Vec<_> = note_specs
            .iter()
            .map(|(day, credit, amount)| {
                let kind = if *credit { CashNoteType::Credit } else { CashNoteType::Debit };
                note_at(kind, *amount, utc(2025, 9, 14 + day, 12, 0))
            })
            .collect();

        let rows = daily_sales(&orders, &notes, &utc_clock());
        let flow = cash_flow(&notes);

        let revenue: Decimal = rows.iter().map(|r| r.revenue).sum();
        let expected: Decimal = orders.iter().map(|o| o.final_amount).sum();
        prop_assert_eq!(revenue, expected);
        prop_assert_eq!(rows.iter().map(|r| r.orders).sum::<u64>(), orders.len() as u64);
        prop_assert_eq!(rows.iter().map(|r| r.credits).sum::<Decimal>(), flow.total_credits);
        prop_assert_eq!(rows.iter().map(|r| r.debits).sum::<Decimal>(), flow.total_debits);

        for row in &rows {
            prop_assert_eq!(row.net_profit, row.revenue + row.credits - row.debits);
        }
        prop_assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
    }
}
