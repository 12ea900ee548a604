//! Role dashboard endpoints.

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionToken};
use crate::commands::dashboard;
use crate::dashboard::{AdminDashboard, DoctorDashboard, PatientDashboard};

/// `GET /api/dashboard/admin`
pub async fn admin(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<AdminDashboard>, ApiError> {
    Ok(Json(dashboard::admin_dashboard(&ctx.core, token.as_deref())?))
}

/// `GET /api/dashboard/doctor`
pub async fn doctor(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<DoctorDashboard>, ApiError> {
    Ok(Json(dashboard::doctor_dashboard(&ctx.core, token.as_deref())?))
}

/// `GET /api/dashboard/patient`
pub async fn patient(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<PatientDashboard>, ApiError> {
    Ok(Json(dashboard::patient_dashboard(&ctx.core, token.as_deref())?))
}
