use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Professional metadata for a `doctor` user, one profile per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub specialization: String,
    pub availability: String,
}
