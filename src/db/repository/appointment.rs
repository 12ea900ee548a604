use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{not_found, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, doctor_id, date, time, status, diagnosis, prescription, notes";

struct AppointmentRow {
    id: String,
    patient_id: String,
    doctor_id: Option<String>,
    date: String,
    time: String,
    status: String,
    diagnosis: Option<String>,
    prescription: Option<String>,
    notes: Option<String>,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        status: row.get(5)?,
        diagnosis: row.get(6)?,
        prescription: row.get(7)?,
        notes: row.get(8)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        doctor_id: row.doctor_id.as_deref().map(parse_uuid).transpose()?,
        date: row.date,
        time: row.time,
        status: row.status,
        diagnosis: row.diagnosis,
        prescription: row.prescription,
        notes: row.notes,
    })
}

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, patient_id, doctor_id, date, time, status,
         diagnosis, prescription, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.doctor_id.map(|id| id.to_string()),
            appt.date,
            appt.time,
            appt.status,
            appt.diagnosis,
            appt.prescription,
            appt.notes,
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
            params![id.to_string()],
            read_row,
        )
        .optional()?;
    row.map(appointment_from_row).transpose()
}

/// The `Booked` appointment occupying a doctor's slot, if any.
pub fn find_booked_appointment(
    conn: &Connection,
    doctor_id: &Uuid,
    date: &str,
    time: &str,
) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE doctor_id = ?1 AND date = ?2 AND time = ?3 AND status = ?4
                 LIMIT 1"
            ),
            params![doctor_id.to_string(), date, time, STATUS_BOOKED],
            read_row,
        )
        .optional()?;
    row.map(appointment_from_row).transpose()
}

/// Appointments matching the filter, newest date and time first.
pub fn list_appointments(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, DatabaseError> {
    let (clause, key) = match filter {
        AppointmentFilter::All => ("", None),
        AppointmentFilter::ByPatient(id) => ("WHERE patient_id = ?1", Some(id.to_string())),
        AppointmentFilter::ByDoctor(id) => ("WHERE doctor_id = ?1", Some(id.to_string())),
    };
    let sql = format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments {clause}
         ORDER BY date DESC, time DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = match key {
        Some(key) => stmt.query_map(params![key], read_row)?.collect::<Result<Vec<_>, _>>()?,
        None => stmt.query_map([], read_row)?.collect::<Result<Vec<_>, _>>()?,
    };

    rows.into_iter().map(appointment_from_row).collect()
}

/// Overwrite status, diagnosis, prescription and notes.
pub fn update_appointment_outcome(
    conn: &Connection,
    id: &Uuid,
    outcome: &AppointmentOutcome,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?2, diagnosis = ?3, prescription = ?4, notes = ?5
         WHERE id = ?1",
        params![
            id.to_string(),
            outcome.status,
            outcome.diagnosis,
            outcome.prescription,
            outcome.notes,
        ],
    )?;
    if changed == 0 {
        return Err(not_found("appointment", id));
    }
    Ok(())
}
