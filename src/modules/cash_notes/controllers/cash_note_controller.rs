use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::BusinessClock;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::cash_notes::models::{
    CashNoteFilter, CreateCashNoteRequest, UpdateCashNoteRequest,
};
use crate::modules::cash_notes::services::CashNoteService;

/// Query parameters for listing cash notes
#[derive(Debug, Deserialize)]
pub struct ListCashNotesQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl ListCashNotesQuery {
    fn into_filter(self, clock: &BusinessClock) -> Result<CashNoteFilter, AppError> {
        if !(1..=200).contains(&self.limit) || self.offset < 0 {
            return Err(AppError::validation("limit must be 1-200 and offset non-negative"));
        }

        let window = clock.optional_days_window(self.from, self.to, Utc::now())?;

        Ok(CashNoteFilter {
            window,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// POST /cash-notes
pub async fn create_note(
    service: web::Data<Arc<CashNoteService>>,
    user: AuthenticatedUser,
    request: web::Json<CreateCashNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let note = service.create_note(request.into_inner(), &user.id).await?;

    Ok(HttpResponse::Created().json(note))
}

/// GET /cash-notes
pub async fn list_notes(
    service: web::Data<Arc<CashNoteService>>,
    clock: web::Data<BusinessClock>,
    query: web::Query<ListCashNotesQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter(&clock)?;
    let notes = service.list_notes(&filter).await?;

    Ok(HttpResponse::Ok().json(notes))
}

/// GET /cash-notes/{id}
pub async fn get_note(
    service: web::Data<Arc<CashNoteService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let note = service.get_note(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(note))
}

/// PUT /cash-notes/{id}
pub async fn update_note(
    service: web::Data<Arc<CashNoteService>>,
    path: web::Path<String>,
    request: web::Json<UpdateCashNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let note = service
        .update_note(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(note))
}

/// DELETE /cash-notes/{id}
pub async fn delete_note(
    service: web::Data<Arc<CashNoteService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_note(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure cash note routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cash-notes")
            .route("", web::post().to(create_note))
            .route("", web::get().to(list_notes))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
