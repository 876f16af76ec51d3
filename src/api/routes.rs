//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::analytics_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET /analytics` - Aggregated click report of the authenticated owner
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics_handler))
}
