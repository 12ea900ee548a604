//! Role dashboards.

use crate::authorization::Operation;
use crate::core_state::CoreState;
use crate::dashboard::{self, AdminDashboard, AllAppointments, DoctorDashboard, PatientDashboard};
use crate::error::DeskError;

pub fn admin_dashboard(core: &CoreState, token: Option<&str>) -> Result<AdminDashboard, DeskError> {
    core.guarded(token, Operation::AdminDashboard, |_, conn| dashboard::admin_dashboard(conn))
}

pub fn all_appointments(core: &CoreState, token: Option<&str>) -> Result<AllAppointments, DeskError> {
    core.guarded(token, Operation::AllAppointments, |_, conn| dashboard::all_appointments(conn))
}

pub fn doctor_dashboard(core: &CoreState, token: Option<&str>) -> Result<DoctorDashboard, DeskError> {
    core.guarded(token, Operation::DoctorDashboard, |session, conn| {
        dashboard::doctor_dashboard(conn, &session.user_id)
    })
}

pub fn patient_dashboard(core: &CoreState, token: Option<&str>) -> Result<PatientDashboard, DeskError> {
    core.guarded(token, Operation::PatientDashboard, |session, conn| {
        dashboard::patient_dashboard(conn, &session.user_id)
    })
}
