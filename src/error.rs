use std::fmt;

use crate::lock::LockError;
use crate::model::StorageError;
use crate::validation::ValidationError;

/// Why a privileged request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No credential supplied.
    Missing,
    /// Credential supplied but wrong.
    Invalid,
    /// The server has no key to compare against.
    Misconfigured,
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Missing => 401,
            AuthError::Invalid => 403,
            AuthError::Misconfigured => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Missing => "AUTH_REQUIRED",
            AuthError::Invalid => "AUTH_INVALID",
            AuthError::Misconfigured => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Missing => write!(f, "Authentication required. Please provide an API key."),
            AuthError::Invalid => write!(f, "Invalid API key"),
            AuthError::Misconfigured => write!(f, "Server configuration error"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Error returned by the collection services.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input failed a field rule.
    Validation(ValidationError),
    /// No record with the requested id; carries the kind label ("Event").
    NotFound(&'static str),
    /// The path exists but not for this HTTP method.
    MethodNotAllowed,
    /// The request body exceeds the configured limit.
    PayloadTooLarge,
    /// The collection could not be read or written.
    Storage(StorageError),
    Auth(AuthError),
    Internal(String),
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::MethodNotAllowed => 405,
            ServiceError::PayloadTooLarge => 413,
            ServiceError::Storage(e) => e.status_code(),
            ServiceError::Auth(e) => e.status_code(),
            ServiceError::Internal(_) => 500,
        }
    }

    /// Machine-readable code for the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ServiceError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ServiceError::Storage(StorageError::DuplicateId { .. }) => "DUPLICATE_ID",
            ServiceError::Storage(_) => "STORAGE_ERROR",
            ServiceError::Auth(e) => e.code(),
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to callers; never includes storage paths.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(e) => e.message.clone(),
            ServiceError::NotFound(label) => format!("{} not found", label),
            ServiceError::MethodNotAllowed => "Method not allowed".to_string(),
            ServiceError::PayloadTooLarge => "Request body too large".to_string(),
            ServiceError::Storage(StorageError::DuplicateId { id, .. }) => {
                format!("A record with id {} already exists", id)
            }
            ServiceError::Storage(_) | ServiceError::Internal(_) => {
                "An internal server error occurred".to_string()
            }
            ServiceError::Auth(e) => e.to_string(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(e) => write!(f, "{}", e),
            ServiceError::NotFound(label) => write!(f, "{} not found", label),
            ServiceError::MethodNotAllowed => write!(f, "method not allowed"),
            ServiceError::PayloadTooLarge => write!(f, "request body too large"),
            ServiceError::Storage(e) => write!(f, "storage error: {}", e),
            ServiceError::Auth(e) => write!(f, "auth error: {}", e),
            ServiceError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Validation(e) => Some(e),
            ServiceError::Storage(e) => Some(e),
            ServiceError::Auth(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err)
    }
}

impl From<LockError> for ServiceError {
    fn from(err: LockError) -> Self {
        ServiceError::Storage(StorageError::Lock(err))
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        ServiceError::Auth(err)
    }
}
