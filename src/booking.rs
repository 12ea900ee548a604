//! Booking engine.
//!
//! A slot is a `(doctor, date, time)` triple with no duration. At most one
//! appointment per slot may carry status `Booked`. The check and the insert
//! run inside one IMMEDIATE transaction, so a second writer waits for the
//! first to commit; the partial unique index on booked slots backs this up
//! for any writer that bypasses this module.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use uuid::Uuid;

use crate::db::repository;
use crate::error::DeskError;
use crate::models::*;

/// A patient's request for one slot.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub date: String,
    pub time: String,
}

fn require_slot_field(value: &str, field: &str) -> Result<String, DeskError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DeskError::InvalidInput(format!("{field} is required")));
    }
    if trimmed.len() > 20 {
        return Err(DeskError::InvalidInput(format!("{field} too long")));
    }
    Ok(trimmed.to_string())
}

/// Ensure `id` names an existing user holding `role`.
fn require_user_with_role(conn: &Connection, id: &Uuid, role: Role) -> Result<User, DeskError> {
    match repository::get_user(conn, id)? {
        Some(user) if user.role == role => Ok(user),
        _ => Err(DeskError::not_found(role.as_str(), id)),
    }
}

/// Conflict on `doctor_id`'s slot, naming the doctor's profile for the
/// booking form when there is one.
fn slot_conflict(conn: &Connection, doctor_id: Uuid, date: &str, time: &str) -> DeskError {
    match repository::get_doctor_profile_by_user(conn, &doctor_id) {
        Ok(profile) => DeskError::SlotConflict {
            doctor_id,
            profile_id: profile.map(|p| p.id),
            date: date.to_string(),
            time: time.to_string(),
        },
        Err(e) => e.into(),
    }
}

/// Book a slot.
///
/// Fails with `SlotConflict` and writes nothing if the doctor already has a
/// `Booked` appointment at that date and time.
pub fn book(conn: &Connection, request: &BookingRequest) -> Result<Appointment, DeskError> {
    let date = require_slot_field(&request.date, "Date")?;
    let time = require_slot_field(&request.time, "Time")?;

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    require_user_with_role(&tx, &request.doctor_id, Role::Doctor)?;
    require_user_with_role(&tx, &request.patient_id, Role::Patient)?;

    if repository::find_booked_appointment(&tx, &request.doctor_id, &date, &time)?.is_some() {
        tracing::warn!(doctor_id = %request.doctor_id, %date, %time, "Slot already booked");
        return Err(slot_conflict(&tx, request.doctor_id, &date, &time));
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        patient_id: request.patient_id,
        doctor_id: Some(request.doctor_id),
        date: date.clone(),
        time: time.clone(),
        status: STATUS_BOOKED.to_string(),
        diagnosis: None,
        prescription: None,
        notes: None,
    };
    repository::insert_appointment(&tx, &appointment).map_err(|e| {
        if e.is_unique_violation() {
            slot_conflict(&tx, request.doctor_id, &date, &time)
        } else {
            e.into()
        }
    })?;
    tx.commit()?;

    tracing::info!(
        appointment_id = %appointment.id,
        doctor_id = %request.doctor_id,
        "Appointment booked"
    );
    Ok(appointment)
}

/// Book against a doctor profile (the id patients see in the doctor list).
pub fn book_with_profile(
    conn: &Connection,
    profile_id: &Uuid,
    patient_id: &Uuid,
    date: &str,
    time: &str,
) -> Result<Appointment, DeskError> {
    let profile = repository::get_doctor_profile(conn, profile_id)?
        .ok_or_else(|| DeskError::not_found("doctor_profile", profile_id))?;
    book(
        conn,
        &BookingRequest {
            doctor_id: profile.user_id,
            patient_id: *patient_id,
            date: date.to_string(),
            time: time.to_string(),
        },
    )
}

/// Overwrite an appointment's status, diagnosis, prescription and notes.
///
/// No status validation beyond non-empty; no ownership check (callers that
/// act on behalf of a doctor check ownership first). Moving an appointment
/// back to `Booked` while another appointment holds its slot fails with
/// `SlotConflict` and changes nothing.
pub fn record_outcome(
    conn: &Connection,
    appointment_id: &Uuid,
    outcome: &AppointmentOutcome,
) -> Result<Appointment, DeskError> {
    let status = outcome.status.trim();
    if status.is_empty() {
        return Err(DeskError::InvalidInput("Status is required".into()));
    }
    let outcome = AppointmentOutcome {
        status: status.to_string(),
        ..outcome.clone()
    };

    let current = repository::get_appointment(conn, appointment_id)?
        .ok_or_else(|| DeskError::not_found("appointment", appointment_id))?;
    repository::update_appointment_outcome(conn, appointment_id, &outcome).map_err(|e| {
        match current.doctor_id {
            Some(doctor_id) if e.is_unique_violation() => {
                tracing::warn!(%appointment_id, "Slot taken by another booking");
                slot_conflict(conn, doctor_id, &current.date, &current.time)
            }
            _ => e.into(),
        }
    })?;
    let updated = repository::get_appointment(conn, appointment_id)?
        .ok_or_else(|| DeskError::not_found("appointment", appointment_id))?;
    tracing::info!(%appointment_id, status = %updated.status, "Appointment outcome recorded");
    Ok(updated)
}
