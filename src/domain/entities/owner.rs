//! Owner entity and its identifier.

use chrono::{DateTime, Utc};
use std::fmt;

/// Identity of a link owner.
///
/// Produced by the authentication layer and inserted into request extensions,
/// so handlers receive a typed value instead of a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account that owns short links and API tokens.
#[derive(Debug, Clone)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
