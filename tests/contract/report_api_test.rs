//! Contract tests for GET /reports
//!
//! Checks the JSON shape the dashboard relies on: camelCase keys, numeric
//! amounts, a string profit margin, and 400s for unusable ranges.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use helpers::{login_token, note_at, simple_order, test_services, utc};
use restaurant_pos::middleware::SessionAuth;
use restaurant_pos::modules::cash_notes::models::CashNoteType;
use restaurant_pos::ServiceSettings;
use rust_decimal_macros::dec;
use serde_json::Value;

#[actix_web::test]
async fn test_report_requires_session() {
    let (services, _stores) = test_services(ServiceSettings::default());
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::get().uri("/reports").to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("missing token must be rejected");

    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_report_response_shape() {
    let (services, stores) = test_services(ServiceSettings::default());
    stores.orders.seed(simple_order("1-20250920", utc(2025, 9, 20, 11, 0), "Nasi Goreng", dec!(100))).await;
    stores.orders.seed(simple_order("2-20250920", utc(2025, 9, 20, 13, 0), "Sate", dec!(150))).await;
    stores.notes.seed(note_at(CashNoteType::Debit, dec!(20), utc(2025, 9, 20, 9, 0))).await;
    let token = login_token(&services).await;

    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/reports?range=custom&startDate=2025-09-20&endDate=2025-09-20")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    for key in ["dailySales", "topItems", "summary", "cashFlow", "recentCashNotes", "dateRange"] {
        assert!(body.get(key).is_some(), "missing section {}", key);
    }

    let day = &body["dailySales"][0];
    assert_eq!(day["date"], "2025-09-20");
    assert_eq!(day["revenue"].as_f64(), Some(250.0));
    assert_eq!(day["orders"].as_u64(), Some(2));
    assert_eq!(day["debits"].as_f64(), Some(20.0));
    assert_eq!(day["netProfit"].as_f64(), Some(230.0));

    let summary = &body["summary"];
    assert_eq!(summary["totalRevenue"].as_f64(), Some(250.0));
    assert_eq!(summary["totalOrders"].as_u64(), Some(2));
    assert_eq!(summary["averageOrderValue"].as_f64(), Some(125.0));
    assert_eq!(summary["topSellingItem"], "Sate");
    assert_eq!(summary["profitMargin"], "92.0");
    assert!(summary["revenueGrowth"].is_number());

    assert_eq!(body["topItems"][0]["name"], "Sate");
    assert_eq!(body["cashFlow"]["debitTransactions"].as_u64(), Some(1));
    assert_eq!(body["recentCashNotes"][0]["type"], "debit");
    assert_eq!(body["dateRange"]["days"].as_i64(), Some(1));
}

#[actix_web::test]
async fn test_empty_report() {
    let (services, _stores) = test_services(ServiceSettings::default());
    let token = login_token(&services).await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/reports?range=today")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["dailySales"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["summary"]["topSellingItem"], "No data");
    assert_eq!(body["summary"]["profitMargin"], "0");
    assert_eq!(body["dateRange"]["days"].as_i64(), Some(1));
}

#[actix_web::test]
async fn test_unusable_ranges_are_bad_requests() {
    let (services, _stores) = test_services(ServiceSettings::default());
    let token = login_token(&services).await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let cases = [
        "/reports?range=fortnight",
        "/reports?range=custom&startDate=2025-09-01",
        "/reports?startDate=2025-09-20&endDate=2025-09-01",
        "/reports?startDate=2024-01-01&endDate=2025-09-01",
        "/reports?startDate=20-09-2025&endDate=2025-09-21",
    ];

    for uri in cases {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], "VALIDATION_ERROR", "{}", uri);
    }
}
