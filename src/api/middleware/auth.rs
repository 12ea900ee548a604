//! Bearer token extraction.
//!
//! Reads `Authorization: Bearer <token>` and injects a [`SessionToken`] into
//! request extensions. Never rejects: unauthenticated requests carry
//! `SessionToken(None)` and the command layer decides what they may do.

use axum::http::{header, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::SessionToken;

pub async fn attach_session(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    req.extensions_mut().insert(SessionToken(token));

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
