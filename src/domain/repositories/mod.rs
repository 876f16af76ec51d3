//! Repository trait definitions for the domain layer.
//!
//! These traits are the only way services reach persistent data. Concrete
//! stores are passed in explicitly (see [`crate::state::AppState`]); there is
//! no process-wide connection.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - PostgreSQL implementations live in `crate::infrastructure::persistence`
//! - An in-memory implementation lives in `crate::infrastructure::memory`
//! - Mock implementations are auto-generated via `mockall` for unit tests
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link Store
//! - [`ClickRepository`] - Click Event Store
//! - [`TokenRepository`] - API token lookup for authentication
//! - [`OwnerRepository`] - Owner accounts

pub mod click_repository;
pub mod link_repository;
pub mod owner_repository;
pub mod token_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use owner_repository::OwnerRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use owner_repository::MockOwnerRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
