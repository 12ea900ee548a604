//! API endpoint handlers.
//!
//! Each module corresponds to one area of the desk. Handlers delegate to
//! [`crate::commands`] and never touch the database directly.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod doctors;
pub mod health;
pub mod patient;

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::error::DeskError;

/// Run a command that hashes or verifies a password on the blocking pool,
/// keeping PBKDF2 off the async workers.
pub(crate) async fn run_blocking<T, F>(core: &Arc<CoreState>, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&CoreState) -> Result<T, DeskError> + Send + 'static,
    T: Send + 'static,
{
    let core = Arc::clone(core);
    tokio::task::spawn_blocking(move || work(&core))
        .await
        .map_err(|e| ApiError::Internal(format!("Blocking task failed: {e}")))?
        .map_err(ApiError::from)
}
