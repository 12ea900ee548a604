//! Shared types for the HTTP API layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::models::AppointmentFilter;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Session token: injected by the session middleware
// ═══════════════════════════════════════════════════════════

/// The bearer token presented with a request, if any. Resolution and role
/// checks happen in the command layer.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

// ═══════════════════════════════════════════════════════════
// Request bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Booking by doctor user id.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub doctor_id: Uuid,
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    pub date: String,
    pub time: String,
}

/// Booking against a profile in the path.
#[derive(Debug, Deserialize)]
pub struct SlotRequest {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

/// `?filter=all|patient|doctor&user_id=<uuid>`
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl AppointmentQuery {
    pub fn into_filter(self) -> Result<AppointmentFilter, ApiError> {
        let require_user = |kind: &str| {
            self.user_id
                .ok_or_else(|| ApiError::BadRequest(format!("user_id is required for filter={kind}")))
        };
        match self.filter.as_deref().unwrap_or("all") {
            "all" => Ok(AppointmentFilter::All),
            "patient" => Ok(AppointmentFilter::ByPatient(require_user("patient")?)),
            "doctor" => Ok(AppointmentFilter::ByDoctor(require_user("doctor")?)),
            other => Err(ApiError::BadRequest(format!("Unknown filter: {other}"))),
        }
    }
}

/// Parse a path id.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".into()))
}

// ═══════════════════════════════════════════════════════════
// Response bodies
// ═══════════════════════════════════════════════════════════

/// Body for operations that have nothing to return but a next view.
#[derive(Debug, Serialize)]
pub struct Done {
    pub ok: bool,
    pub redirect: String,
}

impl Done {
    pub fn to(redirect: impl Into<String>) -> Self {
        Self {
            ok: true,
            redirect: redirect.into(),
        }
    }
}
