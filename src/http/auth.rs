//! Shared-secret authorization for privileged routes.
//!
//! The key is read from `x-api-key` or `Authorization: Bearer <key>`. With no
//! key configured, development servers let requests through (with a warning);
//! any other environment answers 500 `CONFIG_ERROR`.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::warn;

use super::{ApiError, AppState, Settings};
use crate::error::AuthError;
use crate::model::RecordStore;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Extractor proving the request carried a valid API key.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

#[async_trait]
impl<S> FromRequestParts<AppState<S>> for Admin
where
    S: RecordStore + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState<S>) -> Result<Self, Self::Rejection> {
        match authorize(&parts.headers, state.settings()) {
            Ok(()) => Ok(Admin),
            Err(err) => {
                if err == AuthError::Invalid {
                    warn!(path = %parts.uri.path(), "invalid API key attempt");
                }
                Err(state.fail(err.into()))
            }
        }
    }
}

/// Check the request headers against the configured key.
pub fn authorize(headers: &HeaderMap, settings: &Settings) -> Result<(), AuthError> {
    if settings.environment.is_development() && settings.api_key.is_none() {
        warn!("API authentication disabled in development mode");
        return Ok(());
    }

    let supplied = credential(headers).ok_or(AuthError::Missing)?;
    let expected = settings.api_key.as_deref().ok_or_else(|| {
        tracing::error!("API key not configured on the server");
        AuthError::Misconfigured
    })?;

    if constant_time_eq(supplied.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::Invalid)
    }
}

fn credential(headers: &HeaderMap) -> Option<&str> {
    let from_header = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    from_header.or_else(|| {
        headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
