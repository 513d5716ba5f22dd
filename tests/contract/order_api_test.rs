//! Contract tests for the session and order endpoints

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use chrono::Utc;
use helpers::{login_token, test_services, TEST_PASSWORD, TEST_USERNAME};
use restaurant_pos::middleware::SessionAuth;
use restaurant_pos::modules::auth::models::UserRole;
use restaurant_pos::ServiceSettings;
use serde_json::{json, Value};

fn order_body() -> Value {
    json!({
        "items": [
            { "name": "Nasi Goreng", "quantity": 2, "price": 25000 },
            { "name": "Es Teh", "quantity": 1, "price": 5000 }
        ],
        "discount": 5000,
        "tableNumber": "7"
    })
}

#[actix_web::test]
async fn test_health_is_public() {
    let (services, _stores) = test_services(ServiceSettings::default());
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_me_logout() {
    let (services, _stores) = test_services(ServiceSettings::default());
    services
        .auth
        .create_user(TEST_USERNAME, TEST_PASSWORD, "Cashier", UserRole::Staff)
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": TEST_USERNAME, "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
        .to_request();
    let login: Value = test::call_and_read_body_json(&app, req).await;
    let token = login["token"].as_str().expect("token").to_string();
    assert_eq!(login["user"]["displayName"], "Cashier");
    assert!(login.get("expiresAt").is_some());

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["username"], TEST_USERNAME);

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("closed session must be rejected");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_order_requires_session() {
    let (services, stores) = test_services(ServiceSettings::default());
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("Authorization", "Bearer not-a-session"))
        .set_json(order_body())
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("unknown token must be rejected");

    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    assert!(stores.orders.all().await.is_empty());
}

#[actix_web::test]
async fn test_create_order() {
    let (services, _stores) = test_services(ServiceSettings::default());
    let token = login_token(&services).await;
    let user = services.auth.authenticate(&token).await.unwrap();
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(order_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = test::read_body_json(resp).await;
    let number = order["orderNumber"].as_str().expect("orderNumber");
    let (sequence, date) = number.split_once('-').expect("n-YYYYMMDD");
    assert_eq!(sequence, "1");
    assert_eq!(date.len(), 8);
    assert!(date.bytes().all(|b| b.is_ascii_digit()));

    assert_eq!(order["totalAmount"].as_f64(), Some(55000.0));
    assert_eq!(order["discount"].as_f64(), Some(5000.0));
    assert_eq!(order["finalAmount"].as_f64(), Some(50000.0));
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["paymentStatus"], "Pending");
    assert_eq!(order["tableNumber"], "7");
    assert_eq!(order["createdBy"], user.id.as_str());
    assert_eq!(order["isArchived"], false);

    // Second order the same day gets the next number
    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(order_body())
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    let today = Utc::now().format("%Y%m%d").to_string();
    if date == today {
        assert_eq!(second["orderNumber"], format!("2-{}", today));
    }
}

#[actix_web::test]
async fn test_invalid_order_is_bad_request() {
    let (services, stores) = test_services(ServiceSettings::default());
    let token = login_token(&services).await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let bodies = [
        json!({ "items": [] }),
        json!({ "items": [{ "name": "Sate", "quantity": 1, "price": 10 }], "discount": 50 }),
        json!({ "items": "not-a-list" }),
    ];

    for body in bodies {
        let req = test::TestRequest::post()
            .uri("/orders")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    assert!(stores.orders.all().await.is_empty());
}

#[actix_web::test]
async fn test_print_order_sends_receipt() {
    let (services, stores) = test_services(ServiceSettings::default());
    let token = login_token(&services).await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(order_body())
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    let id = order["id"].as_str().expect("id");

    let req = test::TestRequest::post()
        .uri(&format!("/orders/{}/print", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let printed: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(printed["printed"], true);
    assert_eq!(printed["orderNumber"], order["orderNumber"]);
    assert_eq!(stores.printer.jobs.lock().await.len(), 1);
}

#[actix_web::test]
async fn test_archived_order_is_read_only() {
    let (services, _stores) = test_services(ServiceSettings::default());
    let token = login_token(&services).await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(SessionAuth::new(services.auth.clone())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(order_body())
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    let id = order["id"].as_str().expect("id");

    let req = test::TestRequest::post()
        .uri(&format!("/orders/{}/archive", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let archived: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(archived["isArchived"], true);

    let req = test::TestRequest::put()
        .uri(&format!("/orders/{}", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "status": "Paid" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/orders/does-not-exist")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
