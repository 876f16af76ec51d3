//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`client_ip`] - Client IP extraction for click events
//! - [`user_agent`] - Device and browser classification

pub mod client_ip;
pub mod code_generator;
pub mod user_agent;
