//! Role authorization policy.
//!
//! Every operation the desk exposes is listed in [`Operation`] and declares
//! its [`Requirement`] in one table. [`check`] is the only place a session's
//! role is compared against that table; callers never test roles themselves.
//!
//! Default-deny: no session means `NoSession`, a session with the wrong role
//! means `WrongRole`. Neither case runs the operation body.

use serde::Serialize;

use crate::models::Role;
use crate::session::Session;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Protected operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Logout,
    ListDoctors,
    ViewDoctor,
    CreateDoctor,
    EditDoctor,
    DeleteDoctor,
    ListAppointments,
    BookAppointment,
    ViewAppointment,
    RecordOutcome,
    ViewPatientProfile,
    UpdatePatientProfile,
    AdminDashboard,
    DoctorDashboard,
    PatientDashboard,
    AllAppointments,
}

/// Who may run an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any logged-in user.
    Authenticated,
    /// Only users holding this role.
    Role(Role),
}

impl Operation {
    pub fn requirement(self) -> Requirement {
        use Operation::*;
        match self {
            Logout | ListDoctors | ListAppointments => Requirement::Authenticated,
            ViewDoctor | CreateDoctor | EditDoctor | DeleteDoctor | AdminDashboard
            | AllAppointments => Requirement::Role(Role::Admin),
            ViewAppointment | RecordOutcome | DoctorDashboard => Requirement::Role(Role::Doctor),
            BookAppointment | ViewPatientProfile | UpdatePatientProfile | PatientDashboard => {
                Requirement::Role(Role::Patient)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        use Operation::*;
        match self {
            Logout => "logout",
            ListDoctors => "list_doctors",
            ViewDoctor => "view_doctor",
            CreateDoctor => "create_doctor",
            EditDoctor => "edit_doctor",
            DeleteDoctor => "delete_doctor",
            ListAppointments => "list_appointments",
            BookAppointment => "book_appointment",
            ViewAppointment => "view_appointment",
            RecordOutcome => "record_outcome",
            ViewPatientProfile => "view_patient_profile",
            UpdatePatientProfile => "update_patient_profile",
            AdminDashboard => "admin_dashboard",
            DoctorDashboard => "doctor_dashboard",
            PatientDashboard => "patient_dashboard",
            AllAppointments => "all_appointments",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why access was granted (or denied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessReason {
    /// Operation open to any session.
    Authenticated,
    /// Session holds the required role.
    RoleMatched,
    /// No session presented.
    NoSession,
    /// Session role differs from the required one.
    WrongRole { required: Role, actual: Role },
}

/// Result of an authorization check.
#[derive(Debug, Clone)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    fn allow(reason: AccessReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: AccessReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Authorization check
// ═══════════════════════════════════════════════════════════

/// Decide whether `session` may run `operation`.
pub fn check(session: Option<&Session>, operation: Operation) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::deny(AccessReason::NoSession);
    };

    match operation.requirement() {
        Requirement::Authenticated => AccessDecision::allow(AccessReason::Authenticated),
        Requirement::Role(required) if required == session.role => {
            AccessDecision::allow(AccessReason::RoleMatched)
        }
        Requirement::Role(required) => AccessDecision::deny(AccessReason::WrongRole {
            required,
            actual: session.role,
        }),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
