use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::menu::models::{CategoryRequest, CreateMenuItemRequest, UpdateMenuItemRequest};
use crate::modules::menu::services::MenuService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMenuItemsQuery {
    pub category_id: Option<String>,
}

/// POST /categories
pub async fn create_category(
    service: web::Data<Arc<MenuService>>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let category = service.create_category(&request.name).await?;

    Ok(HttpResponse::Created().json(category))
}

/// GET /categories
pub async fn list_categories(
    service: web::Data<Arc<MenuService>>,
) -> Result<HttpResponse, AppError> {
    let categories = service.list_categories().await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// PUT /categories/{id}
pub async fn rename_category(
    service: web::Data<Arc<MenuService>>,
    path: web::Path<String>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let category = service
        .rename_category(&path.into_inner(), &request.name)
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    service: web::Data<Arc<MenuService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_category(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /menu-items
pub async fn create_item(
    service: web::Data<Arc<MenuService>>,
    request: web::Json<CreateMenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service.create_item(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(item))
}

/// GET /menu-items?categoryId=
pub async fn list_items(
    service: web::Data<Arc<MenuService>>,
    query: web::Query<ListMenuItemsQuery>,
) -> Result<HttpResponse, AppError> {
    let items = service.list_items(query.category_id.as_deref()).await?;

    Ok(HttpResponse::Ok().json(items))
}

/// GET /menu-items/{id}
pub async fn get_item(
    service: web::Data<Arc<MenuService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item = service.get_item(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(item))
}

/// PUT /menu-items/{id}
pub async fn update_item(
    service: web::Data<Arc<MenuService>>,
    path: web::Path<String>,
    request: web::Json<UpdateMenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service
        .update_item(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /menu-items/{id}
pub async fn delete_item(
    service: web::Data<Arc<MenuService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_item(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure menu routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::post().to(create_category))
            .route("", web::get().to(list_categories))
            .route("/{id}", web::put().to(rename_category))
            .route("/{id}", web::delete().to(delete_category)),
    )
    .service(
        web::scope("/menu-items")
            .route("", web::post().to(create_item))
            .route("", web::get().to(list_items))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item)),
    );
}
