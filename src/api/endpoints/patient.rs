//! Patient profile endpoints: `GET` and `PUT /api/patient/profile`.

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ProfileUpdate, SessionToken};
use crate::commands::patient;
use crate::models::User;

pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(patient::view_profile(&ctx.core, token.as_deref())?))
}

pub async fn update_profile(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = patient::update_profile(
        &ctx.core,
        token.as_deref(),
        body.user_id,
        body.contact.as_deref(),
        body.age.as_deref(),
    )?;
    Ok(Json(user))
}
