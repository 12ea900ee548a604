use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status given to every new appointment; the only status the slot check looks at.
pub const STATUS_BOOKED: &str = "Booked";
pub const STATUS_COMPLETED: &str = "Completed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// `None` once the doctor's account has been deleted.
    pub doctor_id: Option<Uuid>,
    pub date: String,
    pub time: String,
    pub status: String,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}

impl Appointment {
    pub fn is_booked(&self) -> bool {
        self.status == STATUS_BOOKED
    }
}

/// Fields a doctor writes back after seeing the patient. Status is free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentOutcome {
    pub status: String,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}
