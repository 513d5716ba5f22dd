use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules and request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insert lost the race for an order number (unique index violation)
    #[error("Duplicate order number: {0}")]
    DuplicateOrderNumber(String),

    /// No unique order number could be secured within the retry ceiling
    #[error("Order number allocation exhausted: {0}")]
    AllocationExhausted(String),

    /// Receipt printer unreachable or rejected the write
    #[error("Printer error: {0}")]
    Printer(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Storage details stay in the logs, not in the response body
        let message = match self {
            AppError::Database(_) => "Database error".to_string(),
            _ => self.to_string(),
        };

        if status_code.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        }

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": status_code.as_u16(),
                "kind": self.kind(),
                "message": message,
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DuplicateOrderNumber(_) => StatusCode::CONFLICT,
            AppError::AllocationExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Printer(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn printer(msg: impl Into<String>) -> Self {
        AppError::Printer(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Machine-readable error kind used in response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::DuplicateOrderNumber(_) => "DUPLICATE_ORDER_NUMBER",
            AppError::AllocationExhausted(_) => "ORDER_NUMBER_ALLOCATION_FAILED",
            AppError::Printer(_) => "PRINTER_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Json(_) => "INVALID_JSON",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when a sqlx error is a unique-key violation
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        err.as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false)
    }
}
