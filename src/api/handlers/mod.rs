//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod redirect;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
