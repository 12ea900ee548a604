//! HTTP middleware.
//!
//! Execution order (outermost → innermost):
//! 1. Trace: one span per request
//! 2. CORS
//! 3. Session token extraction

pub mod auth;
