//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::owner::OwnerId;

/// A short link owned by a single account.
///
/// `total_clicks` is a denormalized counter maintained by the click store
/// together with each recorded [`super::Click`]; it only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub owner_id: OwnerId,
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub total_clicks: i64,
}

impl Link {
    /// Returns true if the link has an expiration date strictly before `now`.
    ///
    /// A link without an expiration date never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|e| e < now)
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner_id: OwnerId,
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}
