//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
    pub version: &'static str,
}

/// `GET /api/health`: liveness, unauthenticated.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let status = crate::commands::health_check(&ctx.core)?;
    Ok(Json(HealthResponse {
        status,
        active_sessions: ctx.core.active_sessions()?,
        version: crate::config::APP_VERSION,
    }))
}
