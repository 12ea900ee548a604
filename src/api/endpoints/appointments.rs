//! Appointment endpoints.
//!
//! - `GET /api/appointments?filter=&user_id=`: scoped listing
//! - `POST /api/appointments`: book by doctor user id (patient)
//! - `GET /api/appointments/:id`: detail for the outcome form (doctor)
//! - `PUT /api/appointments/:id/outcome`: record outcome (doctor)
//! - `GET /api/admin/appointments`: every appointment with a user map (admin)

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, AppointmentQuery, BookRequest, SessionToken};
use crate::commands::appointments::{self, AppointmentDetail};
use crate::commands::dashboard;
use crate::dashboard::AllAppointments;
use crate::models::{Appointment, AppointmentOutcome};

pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(appointments::list_appointments(&ctx.core, token.as_deref(), filter)?))
}

pub async fn book(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Json(body): Json<BookRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = appointments::book(
        &ctx.core,
        token.as_deref(),
        &body.doctor_id,
        body.patient_id,
        &body.date,
        &body.time,
    )?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(appointment_id): Path<String>,
) -> Result<Json<AppointmentDetail>, ApiError> {
    let appointment_id = parse_id(&appointment_id)?;
    Ok(Json(appointments::view_appointment(&ctx.core, token.as_deref(), &appointment_id)?))
}

pub async fn record_outcome(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(appointment_id): Path<String>,
    Json(body): Json<AppointmentOutcome>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment_id = parse_id(&appointment_id)?;
    Ok(Json(appointments::record_outcome(
        &ctx.core,
        token.as_deref(),
        &appointment_id,
        &body,
    )?))
}

pub async fn all(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<AllAppointments>, ApiError> {
    Ok(Json(dashboard::all_appointments(&ctx.core, token.as_deref())?))
}
