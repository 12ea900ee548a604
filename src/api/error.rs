//! API error types with structured JSON responses.
//!
//! Authentication and authorization failures answer `303 See Other` with a
//! `Location` header so browser clients land on the login page or the
//! landing page. Everything else is a plain status code. Every body carries
//! `{ "error": { code, message, redirect } }`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::DeskError;
use crate::views::View;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Access denied: {0}")]
    Forbidden(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username already exists")]
    DuplicateUsername(View),
    #[error("{0}")]
    SlotConflict(String, View),
    #[error("Not found: {0}")]
    NotFound(String, View),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn redirect(&self) -> Option<View> {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => Some(View::Login),
            ApiError::Forbidden(_) => Some(View::Index),
            ApiError::DuplicateUsername(retry) => Some(*retry),
            ApiError::SlotConflict(_, back) | ApiError::NotFound(_, back) => Some(*back),
            ApiError::BadRequest(_) | ApiError::Internal(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::SEE_OTHER,
                "AUTH_REQUIRED",
                "Please log in to continue".to_string(),
            ),
            ApiError::Forbidden(detail) => (StatusCode::SEE_OTHER, "FORBIDDEN", detail.clone()),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            ApiError::DuplicateUsername(_) => (
                StatusCode::CONFLICT,
                "DUPLICATE_USERNAME",
                "Username already exists".to_string(),
            ),
            ApiError::SlotConflict(detail, _) => (StatusCode::CONFLICT, "SLOT_CONFLICT", detail.clone()),
            ApiError::NotFound(detail, _) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let redirect = self.redirect().map(|view| view.path().into_owned());
        let location = redirect
            .as_deref()
            .filter(|_| status == StatusCode::SEE_OTHER)
            .and_then(|path| HeaderValue::from_str(path).ok());
        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                redirect,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(location) = location {
            response.headers_mut().insert(header::LOCATION, location);
        }
        response
    }
}

impl From<DeskError> for ApiError {
    fn from(err: DeskError) -> Self {
        let back = err.redirect().unwrap_or(View::Index);
        match err {
            DeskError::AuthenticationRequired => ApiError::Unauthorized,
            DeskError::AuthorizationDenied { .. } => ApiError::Forbidden(err.to_string()),
            DeskError::InvalidCredentials => ApiError::InvalidCredentials,
            DeskError::DuplicateUsername { .. } => ApiError::DuplicateUsername(back),
            DeskError::SlotConflict { .. } => {
                ApiError::SlotConflict("Selected slot already booked".into(), back)
            }
            DeskError::NotFound { .. } => ApiError::NotFound(err.to_string(), back),
            DeskError::InvalidInput(detail) => ApiError::BadRequest(detail),
            DeskError::Database(_)
            | DeskError::Crypto(_)
            | DeskError::LockPoisoned
            | DeskError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}
