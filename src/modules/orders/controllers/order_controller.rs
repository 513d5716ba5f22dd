use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::BusinessClock;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::orders::models::{
    CreateOrderRequest, OrderFilter, OrderStatus, UpdateOrderRequest,
};
use crate::modules::orders::services::OrderService;
use crate::modules::receipts::ReceiptService;

const MAX_LIST_LIMIT: i64 = 200;

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// First calendar day (YYYY-MM-DD) in the reference timezone
    pub from: Option<NaiveDate>,
    /// Last calendar day, inclusive
    pub to: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl ListOrdersQuery {
    fn into_filter(self, clock: &BusinessClock) -> Result<OrderFilter, AppError> {
        if self.limit < 1 || self.limit > MAX_LIST_LIMIT {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }
        if self.offset < 0 {
            return Err(AppError::validation("offset must not be negative"));
        }

        let window = clock.optional_days_window(self.from, self.to, Utc::now())?;

        Ok(OrderFilter {
            window,
            status: self.status,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Create a new order
/// POST /orders
pub async fn create_order(
    service: web::Data<Arc<OrderService>>,
    user: AuthenticatedUser,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .create_order(request.into_inner(), &user.id)
        .await?;

    Ok(HttpResponse::Created().json(order))
}

/// List orders, newest first
/// GET /orders
pub async fn list_orders(
    service: web::Data<Arc<OrderService>>,
    clock: web::Data<BusinessClock>,
    query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter(&clock)?;
    let orders = service.list_orders(&filter).await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{id}
pub async fn get_order(
    service: web::Data<Arc<OrderService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Update items, discount, status or table details
/// PUT /orders/{id}
pub async fn update_order(
    service: web::Data<Arc<OrderService>>,
    path: web::Path<String>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .update_order(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    service: web::Data<Arc<OrderService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_order(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /orders/{id}/archive
pub async fn archive_order(
    service: web::Data<Arc<OrderService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.archive_order(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Send the order's receipt to the printer
/// POST /orders/{id}/print
pub async fn print_order(
    service: web::Data<Arc<OrderService>>,
    receipts: web::Data<Arc<ReceiptService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(&path.into_inner()).await?;
    receipts.print_order(&order).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "printed": true,
        "orderNumber": order.order_number,
    })))
}

/// Configure order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}", web::delete().to(delete_order))
            .route("/{id}/archive", web::post().to(archive_order))
            .route("/{id}/print", web::post().to(print_order)),
    );
}
