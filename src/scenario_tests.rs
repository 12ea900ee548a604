//! End-to-end flows through the command layer, the way a client drives them.

use crate::commands::{appointments, auth, dashboard, doctors};
use crate::config::{DeskConfig, SEED_ADMIN_USERNAME};
use crate::core_state::CoreState;
use crate::crypto::verify_password;
use crate::db::repository;
use crate::doctors::NewDoctor;
use crate::error::DeskError;
use crate::models::*;
use crate::views::View;

fn desk() -> (CoreState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let core = crate::bootstrap(DeskConfig::for_database(tmp.path().join("hospital.db"))).unwrap();
    (core, tmp)
}

fn admin_token(core: &CoreState) -> String {
    auth::login(core, SEED_ADMIN_USERNAME, &core.config.admin_password)
        .unwrap()
        .token
}

#[test]
fn smith_alice_bob_day() {
    let (core, _tmp) = desk();
    let admin = admin_token(&core);

    // Admin creates Dr. Smith.
    let smith = doctors::create_doctor(
        &core,
        Some(&admin),
        &NewDoctor {
            name: "Dr. Smith".into(),
            specialization: "General Practice".into(),
            availability: "Mon-Fri 9-17".into(),
            username: "drsmith".into(),
            password: "smith-pw".into(),
        },
    )
    .unwrap();

    // Alice registers and books drsmith.
    let alice = auth::register(&core, "alice", "alice-pw").unwrap();
    let booked = appointments::book_with_profile(
        &core,
        Some(&alice.token),
        &smith.profile.id,
        "2024-06-01",
        "10:00",
    )
    .unwrap();
    assert_eq!(booked.status, STATUS_BOOKED);

    // Bob tries the same slot.
    let bob = auth::register(&core, "bob", "bob-pw").unwrap();
    let err = appointments::book_with_profile(
        &core,
        Some(&bob.token),
        &smith.profile.id,
        "2024-06-01",
        "10:00",
    )
    .unwrap_err();
    assert!(matches!(err, DeskError::SlotConflict { .. }));
    assert_eq!(err.redirect(), Some(View::BookAppointment(smith.profile.id)));

    // Dr. Smith logs in and records the outcome.
    let doctor = auth::login(&core, "drsmith", "smith-pw").unwrap();
    assert_eq!(doctor.redirect, "/doctor");
    let doctor_view = dashboard::doctor_dashboard(&core, Some(&doctor.token)).unwrap();
    assert_eq!(doctor_view.appointments.len(), 1);
    assert_eq!(doctor_view.patients[&alice.session.user_id].username, "alice");

    appointments::record_outcome(
        &core,
        Some(&doctor.token),
        &booked.id,
        &AppointmentOutcome {
            status: STATUS_COMPLETED.into(),
            diagnosis: Some("flu".into()),
            prescription: Some("rest".into()),
            notes: None,
        },
    )
    .unwrap();

    // Alice sees the completed visit.
    let alice_view = dashboard::patient_dashboard(&core, Some(&alice.token)).unwrap();
    assert_eq!(alice_view.appointments.len(), 1);
    assert_eq!(alice_view.appointments[0].status, STATUS_COMPLETED);
    assert_eq!(alice_view.appointments[0].diagnosis.as_deref(), Some("flu"));
    assert_eq!(alice_view.doctors[&smith.user.id].name, "Dr. Smith");

    // Bob's dashboard stays empty.
    let bob_view = dashboard::patient_dashboard(&core, Some(&bob.token)).unwrap();
    assert!(bob_view.appointments.is_empty());

    // With the slot completed, Bob may now take it.
    assert!(appointments::book_with_profile(
        &core,
        Some(&bob.token),
        &smith.profile.id,
        "2024-06-01",
        "10:00",
    )
    .is_ok());
}

#[test]
fn patient_attempting_admin_operations_changes_nothing() {
    let (core, _tmp) = desk();
    let admin = admin_token(&core);
    let smith = doctors::create_doctor(
        &core,
        Some(&admin),
        &NewDoctor {
            name: "Dr. Smith".into(),
            specialization: "GP".into(),
            availability: String::new(),
            username: "drsmith".into(),
            password: "pw".into(),
        },
    )
    .unwrap();
    let alice = auth::register(&core, "alice", "pw").unwrap();

    let delete = doctors::delete_doctor(&core, Some(&alice.token), &smith.profile.id).unwrap_err();
    assert!(matches!(delete, DeskError::AuthorizationDenied { role: Role::Patient, .. }));
    assert_eq!(delete.redirect(), Some(View::Index));

    let dash = dashboard::admin_dashboard(&core, Some(&alice.token)).unwrap_err();
    assert!(matches!(dash, DeskError::AuthorizationDenied { .. }));

    let conn = core.open_db().unwrap();
    assert!(repository::get_doctor_profile(&conn, &smith.profile.id).unwrap().is_some());
    assert!(repository::username_exists(&conn, "drsmith").unwrap());
}

#[test]
fn deleted_doctor_cannot_log_in_and_history_survives() {
    let (core, _tmp) = desk();
    let admin = admin_token(&core);
    let smith = doctors::create_doctor(
        &core,
        Some(&admin),
        &NewDoctor {
            name: "Dr. Smith".into(),
            specialization: "GP".into(),
            availability: String::new(),
            username: "drsmith".into(),
            password: "pw".into(),
        },
    )
    .unwrap();
    let alice = auth::register(&core, "alice", "pw").unwrap();
    let appt = appointments::book(
        &core,
        Some(&alice.token),
        &smith.user.id,
        None,
        "2024-06-01",
        "10:00",
    )
    .unwrap();

    doctors::delete_doctor(&core, Some(&admin), &smith.profile.id).unwrap();

    assert!(matches!(
        auth::login(&core, "drsmith", "pw"),
        Err(DeskError::InvalidCredentials)
    ));
    let conn = core.open_db().unwrap();
    assert!(repository::get_user_by_username(&conn, "drsmith").unwrap().is_none());

    let mine = appointments::list_appointments(&core, Some(&alice.token), AppointmentFilter::All).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, appt.id);
    assert_eq!(mine[0].doctor_id, None);
}

#[test]
fn stored_password_is_never_plaintext() {
    let (core, _tmp) = desk();
    auth::register(&core, "alice", "correct horse").unwrap();

    let conn = core.open_db().unwrap();
    let stored = repository::get_user_by_username(&conn, "alice").unwrap().unwrap();
    assert_ne!(stored.password_hash, "correct horse");
    assert!(!stored.password_hash.contains("correct horse"));
    assert!(verify_password("correct horse", &stored.password_hash).unwrap());
}
