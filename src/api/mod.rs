//! HTTP API.
//!
//! Exposes the desk operations as JSON endpoints nested under `/api/`.
//! Handlers are thin: they pull the bearer token out of request extensions,
//! call the matching function in [`crate::commands`], and map errors through
//! [`error::ApiError`].

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::desk_router;
pub use server::{serve, DeskServer};
pub use types::ApiContext;
