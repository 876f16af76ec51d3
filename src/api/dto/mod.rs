//! Data Transfer Objects for API responses.
//!
//! Domain values are converted into these Serde types at the HTTP boundary.

pub mod analytics;
pub mod health;
