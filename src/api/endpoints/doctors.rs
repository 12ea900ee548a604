//! Doctor endpoints.
//!
//! - `GET /api/doctors`: directory, any logged-in user
//! - `GET /api/doctors/:profile_id/book`: booking form data (patient)
//! - `POST /api/doctors/:profile_id/appointments`: book against a profile (patient)
//! - `POST /api/admin/doctors` and `GET|PUT|DELETE /api/admin/doctors/:id` (admin)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::endpoints::run_blocking;
use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, Done, SessionToken, SlotRequest};
use crate::commands::{appointments, doctors};
use crate::dashboard::BookingForm;
use crate::doctors::{DoctorDetail, DoctorEdit, NewDoctor};
use crate::models::{Appointment, DoctorProfile};
use crate::views::View;

pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<Vec<DoctorProfile>>, ApiError> {
    Ok(Json(doctors::list_doctors(&ctx.core, token.as_deref())?))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Json(body): Json<NewDoctor>,
) -> Result<(StatusCode, Json<DoctorDetail>), ApiError> {
    let detail = run_blocking(&ctx.core, move |core| {
        doctors::create_doctor(core, token.as_deref(), &body)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(profile_id): Path<String>,
) -> Result<Json<DoctorDetail>, ApiError> {
    let profile_id = parse_id(&profile_id)?;
    Ok(Json(doctors::view_doctor(&ctx.core, token.as_deref(), &profile_id)?))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(profile_id): Path<String>,
    Json(body): Json<DoctorEdit>,
) -> Result<Json<DoctorProfile>, ApiError> {
    let profile_id = parse_id(&profile_id)?;
    Ok(Json(doctors::edit_doctor(&ctx.core, token.as_deref(), &profile_id, &body)?))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(profile_id): Path<String>,
) -> Result<Json<Done>, ApiError> {
    let profile_id = parse_id(&profile_id)?;
    doctors::delete_doctor(&ctx.core, token.as_deref(), &profile_id)?;
    Ok(Json(Done::to(View::DoctorList.path())))
}

pub async fn booking_form(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(profile_id): Path<String>,
) -> Result<Json<BookingForm>, ApiError> {
    let profile_id = parse_id(&profile_id)?;
    Ok(Json(appointments::booking_form(&ctx.core, token.as_deref(), &profile_id)?))
}

pub async fn book(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Path(profile_id): Path<String>,
    Json(body): Json<SlotRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let profile_id = parse_id(&profile_id)?;
    let appointment = appointments::book_with_profile(
        &ctx.core,
        token.as_deref(),
        &profile_id,
        &body.date,
        &body.time,
    )?;
    Ok((StatusCode::CREATED, Json(appointment)))
}
