//! Domain layer containing business entities and logic.
//!
//! Independent of HTTP and SQL: entities, repository contracts, the click
//! aggregation rules and the click ingestion pipeline.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`report`] - Aggregation of click events into owner reports
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves the short code
//! 2. [`click_event::ClickEvent`] is sent to an async channel
//! 3. [`click_worker::run_click_worker`] persists it with retry logic
//! 4. The event and the link counter are written through
//!    [`repositories::ClickRepository::record_click`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod report;
pub mod repositories;
