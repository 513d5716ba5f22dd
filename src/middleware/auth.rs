use crate::core::AppError;
use crate::modules::auth::models::UserRole;
use crate::modules::auth::services::{hash_token, AuthService};
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Paths reachable without a session
const PUBLIC_PATHS: &[&str] = &["/health", "/ready", "/auth/login"];

/// The user behind the current request, placed in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub token_hash: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| Error::from(AppError::unauthorized("Authentication required"))),
        )
    }
}

/// Bearer-token session authentication middleware
pub struct SessionAuth {
    auth_service: Arc<AuthService>,
}

impl SessionAuth {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            auth_service: self.auth_service.clone(),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let auth_service = self.auth_service.clone();

        Box::pin(async move {
            // CORS preflight and public probes pass through
            if req.method() == Method::OPTIONS || PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await;
            }

            let token = bearer_token(&req)
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing bearer token")))?;

            let user = auth_service.authenticate(&token).await.map_err(Error::from)?;

            req.extensions_mut().insert(AuthenticatedUser {
                id: user.id,
                username: user.username,
                role: user.role,
                token_hash: hash_token(&token),
            });

            svc.call(req).await
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
