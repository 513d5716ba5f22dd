use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::auth::models::{LoginResponse, Session, User, UserResponse, UserRole};
use crate::modules::auth::repositories::AuthRepository;

/// Login, logout and bearer-token verification
pub struct AuthService {
    auth_repo: Arc<dyn AuthRepository>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(auth_repo: Arc<dyn AuthRepository>, session_ttl_hours: u32) -> Self {
        Self {
            auth_repo,
            session_ttl: Duration::hours(i64::from(session_ttl_hours)),
        }
    }

    /// Verify credentials and open a session
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let user = self
            .auth_repo
            .find_user_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !verify_password(password, &user.password_hash)? {
            warn!(username = %user.username, "Rejected login with wrong password");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let token = Uuid::new_v4().simple().to_string();
        let session = Session {
            token_hash: hash_token(&token),
            user_id: user.id.clone(),
            expires_at: Utc::now() + self.session_ttl,
        };
        self.auth_repo.insert_session(&session).await?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginResponse {
            token,
            expires_at: session.expires_at,
            user: UserResponse::from(&user),
        })
    }

    /// Close the session identified by its token hash
    pub async fn logout(&self, token_hash: &str) -> Result<()> {
        self.auth_repo.delete_session(token_hash).await
    }

    /// Resolve a bearer token to its user
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let token_hash = hash_token(token);

        let session = self
            .auth_repo
            .find_session(&token_hash)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid session token"))?;

        if session.is_expired(Utc::now()) {
            self.auth_repo.delete_session(&token_hash).await?;
            return Err(AppError::unauthorized("Session expired"));
        }

        self.auth_repo
            .find_user_by_id(&session.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session user no longer exists"))
    }

    pub async fn find_user(&self, id: &str) -> Result<User> {
        self.auth_repo
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))
    }

    /// Create a user with a freshly hashed password
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
    ) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(AppError::validation("Username must be 1-64 characters"));
        }
        if password.len() < 8 {
            return Err(AppError::validation("Password must be at least 8 characters"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            display_name: display_name.trim().to_string(),
            role,
            created_at: Utc::now(),
        };
        self.auth_repo.insert_user(&user).await?;

        Ok(user)
    }

    /// Create the first admin account when no users exist yet
    pub async fn ensure_bootstrap_admin(&self, username: &str, password: &str) -> Result<bool> {
        if self.auth_repo.count_users().await? > 0 {
            return Ok(false);
        }

        let user = self
            .create_user(username, password, "Administrator", UserRole::Admin)
            .await?;
        info!(username = %user.username, "Created bootstrap admin user");

        Ok(true)
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against an Argon2 PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// SHA-256 hex digest of a bearer token, the form stored in `user_sessions`
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
