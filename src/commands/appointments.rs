//! Appointment listing, booking and outcome recording.

use serde::Serialize;
use uuid::Uuid;

use crate::authorization::Operation;
use crate::booking::{self, BookingRequest};
use crate::commands::{deny_foreign, own_id};
use crate::core_state::CoreState;
use crate::dashboard::{self, BookingForm};
use crate::db::repository;
use crate::error::DeskError;
use crate::models::*;

/// An appointment with the patient it belongs to, for the outcome form.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
    pub patient: Option<User>,
}

/// List appointments. Admins may use any filter; patients and doctors only
/// ever see their own, whatever filter they ask for.
pub fn list_appointments(
    core: &CoreState,
    token: Option<&str>,
    filter: AppointmentFilter,
) -> Result<Vec<Appointment>, DeskError> {
    core.guarded(token, Operation::ListAppointments, |session, conn| {
        let scoped = match session.role {
            Role::Admin => filter,
            Role::Patient => AppointmentFilter::ByPatient(session.user_id),
            Role::Doctor => AppointmentFilter::ByDoctor(session.user_id),
        };
        Ok(repository::list_appointments(conn, &scoped)?)
    })
}

/// Book a slot with a doctor (by the doctor's user id). `patient_id`, if
/// given, must be the caller's own id.
pub fn book(
    core: &CoreState,
    token: Option<&str>,
    doctor_id: &Uuid,
    patient_id: Option<Uuid>,
    date: &str,
    time: &str,
) -> Result<Appointment, DeskError> {
    core.guarded(token, Operation::BookAppointment, |session, conn| {
        let patient_id = own_id(session, Operation::BookAppointment, patient_id)?;
        booking::book(
            conn,
            &BookingRequest {
                doctor_id: *doctor_id,
                patient_id,
                date: date.to_string(),
                time: time.to_string(),
            },
        )
    })
}

/// Book a slot with the doctor behind `profile_id`, for the calling patient.
pub fn book_with_profile(
    core: &CoreState,
    token: Option<&str>,
    profile_id: &Uuid,
    date: &str,
    time: &str,
) -> Result<Appointment, DeskError> {
    core.guarded(token, Operation::BookAppointment, |session, conn| {
        booking::book_with_profile(conn, profile_id, &session.user_id, date, time)
    })
}

pub fn booking_form(
    core: &CoreState,
    token: Option<&str>,
    profile_id: &Uuid,
) -> Result<BookingForm, DeskError> {
    core.guarded(token, Operation::BookAppointment, |_, conn| {
        dashboard::booking_form(conn, profile_id)
    })
}

/// Load an appointment owned by the calling doctor.
fn owned_appointment(
    conn: &rusqlite::Connection,
    session: &crate::session::Session,
    operation: Operation,
    appointment_id: &Uuid,
) -> Result<Appointment, DeskError> {
    let appointment = repository::get_appointment(conn, appointment_id)?
        .ok_or_else(|| DeskError::not_found("appointment", appointment_id))?;
    if appointment.doctor_id != Some(session.user_id) {
        return Err(deny_foreign(session, operation, appointment_id));
    }
    Ok(appointment)
}

pub fn view_appointment(
    core: &CoreState,
    token: Option<&str>,
    appointment_id: &Uuid,
) -> Result<AppointmentDetail, DeskError> {
    core.guarded(token, Operation::ViewAppointment, |session, conn| {
        let appointment = owned_appointment(conn, session, Operation::ViewAppointment, appointment_id)?;
        let patient = repository::get_user(conn, &appointment.patient_id)?;
        Ok(AppointmentDetail {
            appointment,
            patient,
        })
    })
}

/// Record the outcome of one of the calling doctor's appointments.
pub fn record_outcome(
    core: &CoreState,
    token: Option<&str>,
    appointment_id: &Uuid,
    outcome: &AppointmentOutcome,
) -> Result<Appointment, DeskError> {
    core.guarded(token, Operation::RecordOutcome, |session, conn| {
        owned_appointment(conn, session, Operation::RecordOutcome, appointment_id)?;
        booking::record_outcome(conn, appointment_id, outcome)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{self, count, login_as, seed_doctor};

    fn completed(diagnosis: &str) -> AppointmentOutcome {
        AppointmentOutcome {
            status: STATUS_COMPLETED.into(),
            diagnosis: Some(diagnosis.into()),
            prescription: None,
            notes: None,
        }
    }

    #[test]
    fn patient_books_for_themself() {
        let (core, _dir) = test_support::core();
        let doc = seed_doctor(&core, "drsmith", "Dr. Smith");
        let alice = login_as(&core, "alice", Role::Patient);

        let appt = book(&core, Some(&alice.token), &doc.user.id, None, "2024-06-01", "10:00").unwrap();
        assert_eq!(appt.patient_id, alice.session.user_id);
        assert_eq!(appt.status, STATUS_BOOKED);
    }

    #[test]
    fn patient_cannot_book_for_someone_else() {
        let (core, _dir) = test_support::core();
        let doc = seed_doctor(&core, "drsmith", "Dr. Smith");
        let alice = login_as(&core, "alice", Role::Patient);
        let bob = login_as(&core, "bob", Role::Patient);

        let err = book(
            &core,
            Some(&alice.token),
            &doc.user.id,
            Some(bob.session.user_id),
            "2024-06-01",
            "10:00",
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::AuthorizationDenied { .. }));
        assert_eq!(count(&core, "appointments"), 0);
    }

    #[test]
    fn booking_by_profile_conflicts_on_taken_slot() {
        let (core, _dir) = test_support::core();
        let doc = seed_doctor(&core, "drsmith", "Dr. Smith");
        let alice = login_as(&core, "alice", Role::Patient);
        let bob = login_as(&core, "bob", Role::Patient);

        book_with_profile(&core, Some(&alice.token), &doc.profile.id, "2024-06-01", "10:00").unwrap();
        let err = book_with_profile(&core, Some(&bob.token), &doc.profile.id, "2024-06-01", "10:00")
            .unwrap_err();
        assert!(matches!(err, DeskError::SlotConflict { .. }));
        assert_eq!(count(&core, "appointments"), 1);
    }

    #[test]
    fn doctors_cannot_book() {
        let (core, _dir) = test_support::core();
        let doc = seed_doctor(&core, "drsmith", "Dr. Smith");
        let session = core.start_session(&doc.user).unwrap();
        let err = book(&core, Some(&session.token), &doc.user.id, None, "2024-06-01", "10:00")
            .unwrap_err();
        assert!(matches!(err, DeskError::AuthorizationDenied { .. }));
    }

    #[test]
    fn listing_is_scoped_for_patients_and_doctors() {
        let (core, _dir) = test_support::core();
        let smith = seed_doctor(&core, "drsmith", "Dr. Smith");
        let jones = seed_doctor(&core, "drjones", "Dr. Jones");
        let alice = login_as(&core, "alice", Role::Patient);
        let bob = login_as(&core, "bob", Role::Patient);
        let admin = login_as(&core, "admin", Role::Admin);

        book(&core, Some(&alice.token), &smith.user.id, None, "2024-06-01", "10:00").unwrap();
        book(&core, Some(&bob.token), &jones.user.id, None, "2024-06-01", "10:00").unwrap();

        // Alice asks for everything but only sees her own.
        let mine = list_appointments(&core, Some(&alice.token), AppointmentFilter::All).unwrap();
        assert_eq!(mine.len(), 1);
        assert!(mine.iter().all(|a| a.patient_id == alice.session.user_id));

        let snoop = list_appointments(
            &core,
            Some(&alice.token),
            AppointmentFilter::ByPatient(bob.session.user_id),
        )
        .unwrap();
        assert!(snoop.iter().all(|a| a.patient_id == alice.session.user_id));

        let smith_session = core.start_session(&smith.user).unwrap();
        let smiths = list_appointments(&core, Some(&smith_session.token), AppointmentFilter::All).unwrap();
        assert_eq!(smiths.len(), 1);
        assert_eq!(smiths[0].doctor_id, Some(smith.user.id));

        let all = list_appointments(&core, Some(&admin.token), AppointmentFilter::All).unwrap();
        assert_eq!(all.len(), 2);
        let bobs = list_appointments(
            &core,
            Some(&admin.token),
            AppointmentFilter::ByPatient(bob.session.user_id),
        )
        .unwrap();
        assert_eq!(bobs.len(), 1);
    }

    #[test]
    fn doctor_records_outcome_on_own_appointment_only() {
        let (core, _dir) = test_support::core();
        let smith = seed_doctor(&core, "drsmith", "Dr. Smith");
        let jones = seed_doctor(&core, "drjones", "Dr. Jones");
        let alice = login_as(&core, "alice", Role::Patient);
        let appt = book(&core, Some(&alice.token), &smith.user.id, None, "2024-06-01", "10:00").unwrap();

        let jones_session = core.start_session(&jones.user).unwrap();
        let err = record_outcome(&core, Some(&jones_session.token), &appt.id, &completed("flu"))
            .unwrap_err();
        assert!(matches!(err, DeskError::AuthorizationDenied { .. }));

        let smith_session = core.start_session(&smith.user).unwrap();
        let updated = record_outcome(&core, Some(&smith_session.token), &appt.id, &completed("flu")).unwrap();
        assert_eq!(updated.status, STATUS_COMPLETED);
        assert_eq!(updated.diagnosis.as_deref(), Some("flu"));
    }

    #[test]
    fn outcome_on_missing_appointment_is_not_found() {
        let (core, _dir) = test_support::core();
        let smith = seed_doctor(&core, "drsmith", "Dr. Smith");
        let session = core.start_session(&smith.user).unwrap();
        let err = record_outcome(&core, Some(&session.token), &Uuid::new_v4(), &completed("flu"))
            .unwrap_err();
        assert!(matches!(err, DeskError::NotFound { .. }));
        assert_eq!(err.redirect(), Some(crate::views::View::DoctorDashboard));
    }

    #[test]
    fn appointment_detail_includes_patient() {
        let (core, _dir) = test_support::core();
        let smith = seed_doctor(&core, "drsmith", "Dr. Smith");
        let alice = login_as(&core, "alice", Role::Patient);
        let appt = book(&core, Some(&alice.token), &smith.user.id, None, "2024-06-01", "10:00").unwrap();

        let session = core.start_session(&smith.user).unwrap();
        let detail = view_appointment(&core, Some(&session.token), &appt.id).unwrap();
        assert_eq!(detail.patient.unwrap().username, "alice");
    }

    #[test]
    fn booking_form_is_for_patients() {
        let (core, _dir) = test_support::core();
        let smith = seed_doctor(&core, "drsmith", "Dr. Smith");
        let alice = login_as(&core, "alice", Role::Patient);

        let form = booking_form(&core, Some(&alice.token), &smith.profile.id).unwrap();
        assert_eq!(form.doctor.name, "Dr. Smith");
    }
}
