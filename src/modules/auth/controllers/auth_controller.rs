use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::{LoginRequest, UserResponse};
use crate::modules::auth::services::AuthService;

/// Exchange credentials for a bearer token
/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let response = service.login(&request.username, &request.password).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Invalidate the caller's session
/// POST /auth/logout
pub async fn logout(
    service: web::Data<Arc<AuthService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    service.logout(&user.token_hash).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /auth/me
pub async fn me(
    service: web::Data<Arc<AuthService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = service.find_user(&user.id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
