use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Hospital Desk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Username of the administrator seeded on first start.
pub const SEED_ADMIN_USERNAME: &str = "admin";
/// Fallback seed password when `HOSPITAL_DESK_ADMIN_PASSWORD` is unset.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 600_000;

const ENV_DB: &str = "HOSPITAL_DESK_DB";
const ENV_ADDR: &str = "HOSPITAL_DESK_ADDR";
const ENV_ADMIN_PASSWORD: &str = "HOSPITAL_DESK_ADMIN_PASSWORD";
const ENV_ITERATIONS: &str = "HOSPITAL_DESK_PBKDF2_ITERATIONS";

/// Get the application data directory
/// ~/HospitalDesk/ on all platforms, current directory if no home exists
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("HospitalDesk")
}

/// Default SQLite database location
pub fn database_path() -> PathBuf {
    app_data_dir().join("hospital.db")
}

/// Log filter used when `RUST_LOG` is not set
pub fn default_log_filter() -> &'static str {
    "info,hospital_desk_lib=debug,tower_http=info"
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Plaintext password for the seeded admin. Only used when no admin exists yet.
    pub admin_password: String,
    pub pbkdf2_iterations: u32,
}

impl DeskConfig {
    /// Build the configuration from `HOSPITAL_DESK_*` environment variables.
    ///
    /// Unparseable values fall back to defaults with a warning rather than
    /// aborting startup.
    pub fn from_env() -> Self {
        let database_path = std::env::var_os(ENV_DB)
            .map(PathBuf::from)
            .unwrap_or_else(database_path);

        let bind_addr = match std::env::var(ENV_ADDR) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid {ENV_ADDR}, using {DEFAULT_BIND_ADDR}");
                default_bind_addr()
            }),
            Err(_) => default_bind_addr(),
        };

        let admin_password = std::env::var(ENV_ADMIN_PASSWORD).unwrap_or_else(|_| {
            tracing::warn!("{ENV_ADMIN_PASSWORD} not set, seed admin uses the default password");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        let pbkdf2_iterations = std::env::var(ENV_ITERATIONS)
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PBKDF2_ITERATIONS);

        Self {
            database_path,
            bind_addr,
            admin_password,
            pbkdf2_iterations,
        }
    }

    /// Configuration for tests: given database path, cheap hashing, ephemeral port.
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            pbkdf2_iterations: 1_000,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}
