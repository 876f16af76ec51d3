//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; aggregation over them lives in
//! [`crate::domain::report`].
//!
//! # Entity Types
//!
//! - [`Owner`] - The account a bearer token resolves to; owns links
//! - [`Link`] - A short code mapped to a destination URL
//! - [`Click`] - One recorded redirect through a link
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewLink` and `NewClick` carry only the caller-supplied fields, the store
//! assigns ids and defaults.

pub mod click;
pub mod link;
pub mod owner;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
pub use owner::{Owner, OwnerId};
