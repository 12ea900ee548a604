//! Authentication endpoints.
//!
//! `POST /api/auth/register`, `POST /api/auth/login` and `POST /api/auth/logout`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::endpoints::run_blocking;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Credentials, Done, SessionToken};
use crate::commands::auth::{self, SessionGrant};
use crate::views::View;

/// `POST /api/auth/register`: new patient account, logged in on success.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<SessionGrant>), ApiError> {
    let grant = run_blocking(&ctx.core, move |core| {
        auth::register(core, &body.username, &body.password)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(grant)))
}

/// `POST /api/auth/login`: token plus the role's dashboard path.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(body): Json<Credentials>,
) -> Result<Json<SessionGrant>, ApiError> {
    let grant = run_blocking(&ctx.core, move |core| {
        auth::login(core, &body.username, &body.password)
    })
    .await?;
    Ok(Json(grant))
}

pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<Done>, ApiError> {
    auth::logout(&ctx.core, token.as_deref())?;
    Ok(Json(Done::to(View::Login.path())))
}
