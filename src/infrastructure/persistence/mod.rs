//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements. Rows are mapped through `FromRow` structs, so building the
//! crate does not need a live database.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgClickRepository`] - Click event log and link counters
//! - [`PgOwnerRepository`] - Owner accounts
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_owner_repository;
pub mod pg_token_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_owner_repository::PgOwnerRepository;
pub use pg_token_repository::PgTokenRepository;
