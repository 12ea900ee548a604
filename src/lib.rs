pub mod accounts;
pub mod api;
pub mod authorization;
pub mod booking;
pub mod commands;
pub mod config;
pub mod core_state; // Transport-agnostic state + guard
pub mod crypto;
pub mod dashboard;
pub mod db;
pub mod doctors;
pub mod error;
pub mod models;
pub mod session;
pub mod views;

#[cfg(test)]
mod scenario_tests;

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::DeskConfig;
use crate::core_state::CoreState;
use crate::error::DeskError;

/// Prepare the database and build the shared state.
///
/// Creates the data directory if needed, applies migrations and seeds the
/// administrator account on first start.
pub fn bootstrap(config: DeskConfig) -> Result<CoreState, DeskError> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let core = CoreState::new(config);
    {
        let conn = core.open_db()?;
        accounts::seed_admin(
            &conn,
            config::SEED_ADMIN_USERNAME,
            &core.config.admin_password,
            core.password_iterations(),
        )?;
    }
    tracing::info!(path = %core.config.database_path.display(), "Database ready");
    Ok(core)
}

async fn serve_until_ctrl_c(core: Arc<CoreState>) -> Result<(), DeskError> {
    let addr = core.config.bind_addr;
    let mut server = api::serve(core, addr).await?;
    tracing::info!(addr = %server.addr, "{} listening", config::APP_NAME);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}

pub fn run() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let result = bootstrap(DeskConfig::from_env()).and_then(|core| {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(serve_until_ctrl_c(Arc::new(core)))
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
