//! Per-role dashboard view models.
//!
//! Each dashboard is a single fetch: the listing plus whatever lookup maps the
//! client needs to render names next to ids. All functions are read-only.

use std::collections::HashMap;

use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository;
use crate::error::DeskError;
use crate::models::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Admin landing view.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub doctors: Vec<DoctorProfile>,
    pub patients: Vec<User>,
    pub appointments: Vec<Appointment>,
}

/// Doctor landing view. `profile` is `None` for a doctor login with no profile row.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorDashboard {
    pub profile: Option<DoctorProfile>,
    pub appointments: Vec<Appointment>,
    pub patients: HashMap<Uuid, User>,
}

/// Patient landing view. `doctors` is keyed by the doctor's user id, which is
/// what appointments reference.
#[derive(Debug, Clone, Serialize)]
pub struct PatientDashboard {
    pub user: User,
    pub available_doctors: Vec<DoctorProfile>,
    pub appointments: Vec<Appointment>,
    pub doctors: HashMap<Uuid, DoctorProfile>,
}

/// Admin view of every appointment with the users it references.
#[derive(Debug, Clone, Serialize)]
pub struct AllAppointments {
    pub appointments: Vec<Appointment>,
    pub users: HashMap<Uuid, User>,
}

/// Data for the booking form.
#[derive(Debug, Clone, Serialize)]
pub struct BookingForm {
    pub doctor: DoctorProfile,
    /// Earliest selectable date, `YYYY-MM-DD` in server local time.
    pub today: String,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn users_by_id(users: Vec<User>) -> HashMap<Uuid, User> {
    users.into_iter().map(|u| (u.id, u)).collect()
}

pub fn admin_dashboard(conn: &Connection) -> Result<AdminDashboard, DeskError> {
    Ok(AdminDashboard {
        doctors: repository::list_doctor_profiles(conn)?,
        patients: repository::list_users(
            conn,
            &UserFilter {
                role: Some(Role::Patient),
            },
        )?,
        appointments: repository::list_appointments(conn, &AppointmentFilter::All)?,
    })
}

pub fn doctor_dashboard(conn: &Connection, doctor_id: &Uuid) -> Result<DoctorDashboard, DeskError> {
    let appointments = repository::list_appointments(conn, &AppointmentFilter::ByDoctor(*doctor_id))?;

    let mut patients = HashMap::new();
    for appt in &appointments {
        if patients.contains_key(&appt.patient_id) {
            continue;
        }
        if let Some(patient) = repository::get_user(conn, &appt.patient_id)? {
            patients.insert(patient.id, patient);
        }
    }

    Ok(DoctorDashboard {
        profile: repository::get_doctor_profile_by_user(conn, doctor_id)?,
        appointments,
        patients,
    })
}

pub fn patient_dashboard(conn: &Connection, patient_id: &Uuid) -> Result<PatientDashboard, DeskError> {
    let user = repository::get_user(conn, patient_id)?
        .ok_or_else(|| DeskError::not_found("user", patient_id))?;
    let available_doctors = repository::list_doctor_profiles(conn)?;
    let doctors = available_doctors
        .iter()
        .map(|p| (p.user_id, p.clone()))
        .collect();

    Ok(PatientDashboard {
        user,
        available_doctors,
        appointments: repository::list_appointments(conn, &AppointmentFilter::ByPatient(*patient_id))?,
        doctors,
    })
}

pub fn all_appointments(conn: &Connection) -> Result<AllAppointments, DeskError> {
    let appointments = repository::list_appointments(conn, &AppointmentFilter::All)?;
    let users = users_by_id(repository::list_users(conn, &UserFilter::default())?);
    Ok(AllAppointments { appointments, users })
}

pub fn booking_form(conn: &Connection, profile_id: &Uuid) -> Result<BookingForm, DeskError> {
    let doctor = repository::get_doctor_profile(conn, profile_id)?
        .ok_or_else(|| DeskError::not_found("doctor_profile", profile_id))?;
    Ok(BookingForm {
        doctor,
        today: Local::now().format("%Y-%m-%d").to_string(),
    })
}
