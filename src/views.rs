//! Named landing views that operations and errors redirect to.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Index,
    Login,
    Register,
    AdminDashboard,
    DoctorList,
    DoctorForm,
    AllAppointments,
    DoctorDashboard,
    PatientDashboard,
    PatientProfile,
    /// Booking form for one doctor profile.
    BookAppointment(Uuid),
}

impl View {
    pub fn path(self) -> Cow<'static, str> {
        let fixed = match self {
            View::Index => "/",
            View::Login => "/login",
            View::Register => "/register",
            View::AdminDashboard => "/admin",
            View::DoctorList => "/admin/doctors",
            View::DoctorForm => "/admin/doctor/new",
            View::AllAppointments => "/appointments",
            View::DoctorDashboard => "/doctor",
            View::PatientDashboard => "/patient",
            View::PatientProfile => "/patient/profile",
            View::BookAppointment(profile_id) => return Cow::Owned(format!("/book/{profile_id}")),
        };
        Cow::Borrowed(fixed)
    }
}

impl Role {
    /// Where a user of this role lands after logging in.
    pub fn dashboard(self) -> View {
        match self {
            Role::Admin => View::AdminDashboard,
            Role::Doctor => View::DoctorDashboard,
            Role::Patient => View::PatientDashboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_lands_on_its_dashboard() {
        assert_eq!(Role::Admin.dashboard().path(), "/admin");
        assert_eq!(Role::Doctor.dashboard().path(), "/doctor");
        assert_eq!(Role::Patient.dashboard().path(), "/patient");
    }

    #[test]
    fn booking_view_names_the_doctor_profile() {
        let profile_id = Uuid::new_v4();
        assert_eq!(
            View::BookAppointment(profile_id).path(),
            format!("/book/{profile_id}")
        );
    }
}
