//! Response envelope: `{success, count?, message?, data?}` on success,
//! `{success: false, error: {message, code, details?}}` on failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::ServiceError;
use crate::validation::FieldError;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn ok(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }

    pub fn created(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            message: None,
            data: Some(items),
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: None,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

/// A service error on its way to the caller.
///
/// Server-side (5xx) detail is only disclosed when `expose_detail` is set
/// (development); it is always logged.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    expose_detail: bool,
}

impl ApiError {
    pub fn new(error: ServiceError, expose_detail: bool) -> Self {
        Self {
            error,
            expose_detail,
        }
    }

    pub fn error(&self) -> &ServiceError {
        &self.error
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(status = status.as_u16(), code = self.error.code(), error = %self.error, "request failed");
            if self.expose_detail {
                self.error.to_string()
            } else {
                self.error.public_message()
            }
        } else {
            debug!(status = status.as_u16(), code = self.error.code(), error = %self.error, "request rejected");
            self.error.public_message()
        };

        let details = match &self.error {
            ServiceError::Validation(v) if !v.details.is_empty() => Some(v.details.as_slice()),
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            error: ErrorDetail {
                message,
                code: self.error.code(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
