//! Patient self-service profile.

use uuid::Uuid;

use crate::accounts;
use crate::authorization::Operation;
use crate::commands::own_id;
use crate::core_state::CoreState;
use crate::db::repository;
use crate::error::DeskError;
use crate::models::User;

pub fn view_profile(core: &CoreState, token: Option<&str>) -> Result<User, DeskError> {
    core.guarded(token, Operation::ViewPatientProfile, |session, conn| {
        repository::get_user(conn, &session.user_id)?
            .ok_or_else(|| DeskError::not_found("user", session.user_id))
    })
}

/// Update contact and age. `user_id`, if given, must be the caller's own id.
pub fn update_profile(
    core: &CoreState,
    token: Option<&str>,
    user_id: Option<Uuid>,
    contact: Option<&str>,
    age: Option<&str>,
) -> Result<User, DeskError> {
    core.guarded(token, Operation::UpdatePatientProfile, |session, conn| {
        let user_id = own_id(session, Operation::UpdatePatientProfile, user_id)?;
        let user = accounts::update_patient_profile(conn, &user_id, contact, age)?;
        tracing::info!(%user_id, "Patient profile updated");
        Ok(user)
    })
}
