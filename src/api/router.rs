//! API router.
//!
//! Returns a composable `Router` with every desk endpoint under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Trace → 2. CORS → 3. Session token extraction

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the desk API router.
///
/// No route rejects a request for lack of a token at the HTTP level; the
/// command layer answers with a redirect to the login view instead.
pub fn desk_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/auth/logout", post(endpoints::auth::logout))
        .route("/doctors", get(endpoints::doctors::list))
        .route(
            "/doctors/:profile_id/book",
            get(endpoints::doctors::booking_form),
        )
        .route(
            "/doctors/:profile_id/appointments",
            post(endpoints::doctors::book),
        )
        .route("/admin/doctors", post(endpoints::doctors::create))
        .route(
            "/admin/doctors/:id",
            get(endpoints::doctors::detail)
                .put(endpoints::doctors::update)
                .delete(endpoints::doctors::remove),
        )
        .route("/admin/appointments", get(endpoints::appointments::all))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::book),
        )
        .route("/appointments/:id", get(endpoints::appointments::detail))
        .route(
            "/appointments/:id/outcome",
            put(endpoints::appointments::record_outcome),
        )
        .route(
            "/patient/profile",
            get(endpoints::patient::profile).put(endpoints::patient::update_profile),
        )
        .route("/dashboard/admin", get(endpoints::dashboard::admin))
        .route("/dashboard/doctor", get(endpoints::dashboard::doctor))
        .route("/dashboard/patient", get(endpoints::dashboard::patient))
        .with_state(ctx)
        // Middleware stack (innermost first, outermost last):
        .layer(axum::middleware::from_fn(middleware::auth::attach_session))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    Router::new().nest("/api", api)
}
