//! Error types shared by all bootcamp Lambda functions

use thiserror::Error;

/// Result type alias using the bootcamp Error
pub type Result<T> = std::result::Result<T, Error>;

/// Bootcamp error types
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required request field is missing
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// No route matches the request
    #[error("Bad request syntax or unsupported method. Request path: {path}. HTTP method: {method}")]
    BadRoute { method: String, path: String },

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// User already exists in the user pool
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Auth service rejected the operation
    #[error("Auth error: {0}")]
    AuthFailed(String),

    /// Reservation window collides with an existing one
    #[error("Reservation conflict: {0}")]
    ReservationConflict(String),

    /// DynamoDB error
    #[error("Database error: {0}")]
    Database(String),

    /// Object storage error
    #[error("Object store error: {0}")]
    ObjectStore(String),

    /// Third-party API error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// DynamoDB serialization error
    #[error("DynamoDB serialization error: {0}")]
    DynamoSerialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::MissingField(_) => "validation_error",
            Error::BadRoute { .. } => "bad_request",
            Error::NotFound(_) => "not_found",
            Error::Unauthorized(_) => "unauthorized",
            Error::UserExists(_) => "user_exists",
            Error::AuthFailed(_) => "auth_failed",
            Error::ReservationConflict(_) => "reservation_conflict",
            Error::Database(_) => "database_error",
            Error::ObjectStore(_) => "object_store_error",
            Error::Upstream(_) => "upstream_error",
            Error::Serialization(_) => "serialization_error",
            Error::DynamoSerialization(_) => "serialization_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::MissingField(_) => 400,
            Error::BadRoute { .. } => 400,
            Error::NotFound(_) => 404,
            Error::Unauthorized(_) => 401,
            Error::UserExists(_) => 400,
            Error::AuthFailed(_) => 400,
            Error::ReservationConflict(_) => 400,
            Error::Database(_) => 400,
            Error::ObjectStore(_) => 500,
            Error::Upstream(_) => 500,
            Error::Serialization(_) => 400,
            Error::DynamoSerialization(_) => 500,
            Error::Internal(_) => 500,
        }
    }
}
