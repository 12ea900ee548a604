//! Doctor directory and admin doctor management.

use uuid::Uuid;

use crate::authorization::Operation;
use crate::core_state::CoreState;
use crate::doctors::{self, DoctorDetail, DoctorEdit, NewDoctor};
use crate::error::DeskError;
use crate::models::DoctorProfile;

/// Every doctor profile, for any logged-in user.
pub fn list_doctors(core: &CoreState, token: Option<&str>) -> Result<Vec<DoctorProfile>, DeskError> {
    core.guarded(token, Operation::ListDoctors, |_, conn| doctors::list_doctors(conn))
}

/// Profile plus login details, for the admin edit form.
pub fn view_doctor(
    core: &CoreState,
    token: Option<&str>,
    profile_id: &Uuid,
) -> Result<DoctorDetail, DeskError> {
    core.guarded(token, Operation::ViewDoctor, |_, conn| {
        doctors::get_doctor(conn, profile_id)
    })
}

pub fn create_doctor(
    core: &CoreState,
    token: Option<&str>,
    input: &NewDoctor,
) -> Result<DoctorDetail, DeskError> {
    let iterations = core.password_iterations();
    core.guarded(token, Operation::CreateDoctor, |_, conn| {
        doctors::create_doctor(conn, input, iterations)
    })
}

pub fn edit_doctor(
    core: &CoreState,
    token: Option<&str>,
    profile_id: &Uuid,
    edit: &DoctorEdit,
) -> Result<DoctorProfile, DeskError> {
    core.guarded(token, Operation::EditDoctor, |_, conn| {
        doctors::edit_doctor(conn, profile_id, edit)
    })
}

/// Delete a doctor and log out any sessions the doctor still holds.
pub fn delete_doctor(core: &CoreState, token: Option<&str>, profile_id: &Uuid) -> Result<(), DeskError> {
    let user_id = core.guarded(token, Operation::DeleteDoctor, |_, conn| {
        doctors::delete_doctor(conn, profile_id)
    })?;
    let ended = core.end_sessions_for_user(&user_id)?;
    if ended > 0 {
        tracing::info!(%user_id, ended, "Ended sessions of deleted doctor");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{self, count, login_as, user_exists};
    use crate::models::Role;

    fn new_doctor(username: &str) -> NewDoctor {
        NewDoctor {
            name: "Dr. Smith".into(),
            specialization: "Cardiology".into(),
            availability: "Mon".into(),
            username: username.into(),
            password: "pw".into(),
        }
    }

    #[test]
    fn admin_manages_doctors() {
        let (core, _dir) = test_support::core();
        let admin = login_as(&core, "admin", Role::Admin);
        let token = Some(admin.token.as_str());

        let created = create_doctor(&core, token, &new_doctor("drsmith")).unwrap();
        assert_eq!(list_doctors(&core, token).unwrap().len(), 1);

        let edited = edit_doctor(
            &core,
            token,
            &created.profile.id,
            &DoctorEdit {
                name: "Dr. Jane Smith".into(),
                specialization: "Cardiology".into(),
                availability: "Tue".into(),
            },
        )
        .unwrap();
        assert_eq!(edited.name, "Dr. Jane Smith");
        assert_eq!(
            view_doctor(&core, token, &created.profile.id).unwrap().user.username,
            "drsmith"
        );

        delete_doctor(&core, token, &created.profile.id).unwrap();
        assert!(list_doctors(&core, token).unwrap().is_empty());
        assert!(!user_exists(&core, "drsmith"));
    }

    #[test]
    fn patient_cannot_create_doctor_and_nothing_is_written() {
        let (core, _dir) = test_support::core();
        let alice = login_as(&core, "alice", Role::Patient);
        let users_before = count(&core, "users");

        let err = create_doctor(&core, Some(&alice.token), &new_doctor("sneaky")).unwrap_err();
        assert!(matches!(err, DeskError::AuthorizationDenied { .. }));
        assert_eq!(err.redirect(), Some(crate::views::View::Index));
        assert_eq!(count(&core, "users"), users_before);
        assert_eq!(count(&core, "doctor_profiles"), 0);
    }

    #[test]
    fn duplicate_doctor_username_returns_to_doctor_form() {
        let (core, _dir) = test_support::core();
        let admin = login_as(&core, "admin", Role::Admin);
        create_doctor(&core, Some(&admin.token), &new_doctor("drsmith")).unwrap();

        let err = create_doctor(&core, Some(&admin.token), &new_doctor("drsmith")).unwrap_err();
        assert!(matches!(err, DeskError::DuplicateUsername { .. }));
        assert_eq!(err.redirect(), Some(crate::views::View::DoctorForm));
        assert_eq!(count(&core, "doctor_profiles"), 1);
    }

    #[test]
    fn doctor_list_requires_login() {
        let (core, _dir) = test_support::core();
        assert!(matches!(
            list_doctors(&core, None),
            Err(DeskError::AuthenticationRequired)
        ));
    }

    #[test]
    fn deleting_doctor_ends_their_sessions() {
        let (core, _dir) = test_support::core();
        let admin = login_as(&core, "admin", Role::Admin);
        let created = create_doctor(&core, Some(&admin.token), &new_doctor("drsmith")).unwrap();
        let doctor_session = core.start_session(&created.user).unwrap();

        delete_doctor(&core, Some(&admin.token), &created.profile.id).unwrap();
        assert!(core.resolve_session(Some(&doctor_session.token)).unwrap().is_none());
    }

    #[test]
    fn deleting_unknown_doctor_is_not_found() {
        let (core, _dir) = test_support::core();
        let admin = login_as(&core, "admin", Role::Admin);
        assert!(matches!(
            delete_doctor(&core, Some(&admin.token), &Uuid::new_v4()),
            Err(DeskError::NotFound { .. })
        ));
    }
}
