use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which appointments a listing covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum AppointmentFilter {
    #[default]
    All,
    ByPatient(Uuid),
    ByDoctor(Uuid),
}

#[derive(Debug, Default)]
pub struct UserFilter {
    pub role: Option<super::enums::Role>,
}
