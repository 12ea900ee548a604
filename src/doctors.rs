//! Doctor account management (admin only at the command layer).
//!
//! A doctor is two rows: a `users` row with role `doctor` that holds the login,
//! and a `doctor_profiles` row that holds the public-facing details. Both are
//! created and deleted together.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts;
use crate::db::repository;
use crate::error::DeskError;
use crate::models::*;
use crate::views::View;

/// Admin input for a new doctor.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub availability: String,
    pub username: String,
    pub password: String,
}

/// Editable profile fields. Login credentials are not editable here.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorEdit {
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub availability: String,
}

/// A profile together with its backing login.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorDetail {
    pub profile: DoctorProfile,
    pub user: User,
}

fn require_text(value: &str, field: &str) -> Result<String, DeskError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DeskError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Create the login and the profile in one transaction.
pub fn create_doctor(
    conn: &Connection,
    input: &NewDoctor,
    iterations: u32,
) -> Result<DoctorDetail, DeskError> {
    let name = require_text(&input.name, "Name")?;
    let specialization = require_text(&input.specialization, "Specialization")?;

    let tx = conn.unchecked_transaction()?;
    let user = accounts::create_user(
        &tx,
        &input.username,
        &input.password,
        Role::Doctor,
        iterations,
    )
    .map_err(|e| e.retry_on(View::DoctorForm))?;
    let profile = DoctorProfile {
        id: Uuid::new_v4(),
        user_id: user.id,
        name,
        specialization,
        availability: input.availability.trim().to_string(),
    };
    repository::insert_doctor_profile(&tx, &profile)?;
    tx.commit()?;

    tracing::info!(profile_id = %profile.id, user_id = %user.id, "Doctor created");
    Ok(DoctorDetail { profile, user })
}

pub fn list_doctors(conn: &Connection) -> Result<Vec<DoctorProfile>, DeskError> {
    Ok(repository::list_doctor_profiles(conn)?)
}

pub fn get_doctor(conn: &Connection, profile_id: &Uuid) -> Result<DoctorDetail, DeskError> {
    let profile = repository::get_doctor_profile(conn, profile_id)?
        .ok_or_else(|| DeskError::not_found("doctor_profile", profile_id))?;
    let user = repository::get_user(conn, &profile.user_id)?
        .ok_or_else(|| DeskError::not_found("user", profile.user_id))?;
    Ok(DoctorDetail { profile, user })
}

pub fn edit_doctor(
    conn: &Connection,
    profile_id: &Uuid,
    edit: &DoctorEdit,
) -> Result<DoctorProfile, DeskError> {
    let name = require_text(&edit.name, "Name")?;
    let specialization = require_text(&edit.specialization, "Specialization")?;
    repository::update_doctor_profile(
        conn,
        profile_id,
        &name,
        &specialization,
        edit.availability.trim(),
    )?;
    tracing::info!(%profile_id, "Doctor profile updated");
    repository::get_doctor_profile(conn, profile_id)?
        .ok_or_else(|| DeskError::not_found("doctor_profile", profile_id))
}

/// Remove the profile and its login. Appointments that referenced the doctor
/// keep their history with `doctor_id` cleared.
///
/// Returns the deleted user's id so the caller can end that user's sessions.
pub fn delete_doctor(conn: &Connection, profile_id: &Uuid) -> Result<Uuid, DeskError> {
    let tx = conn.unchecked_transaction()?;
    let profile = repository::get_doctor_profile(&tx, profile_id)?
        .ok_or_else(|| DeskError::not_found("doctor_profile", profile_id))?;
    repository::delete_doctor_profile(&tx, profile_id)?;
    repository::delete_user(&tx, &profile.user_id)?;
    tx.commit()?;

    tracing::info!(%profile_id, user_id = %profile.user_id, "Doctor deleted");
    Ok(profile.user_id)
}
