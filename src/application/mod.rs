//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::report_service::ReportService`] - Per-owner click reports
//! - [`services::link_service::LinkService`] - Link resolution and creation
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
