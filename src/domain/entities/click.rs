//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click event recorded when a short link is followed.
///
/// Immutable once stored. `device` and `browser` are derived from the
/// client's `User-Agent` at ingestion time and may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub timestamp: DateTime<Utc>,
    pub ip: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
    pub location: Option<String>,
}

/// Input data for recording a new click event.
///
/// The `link_id` must reference an existing link.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub timestamp: DateTime<Utc>,
    pub ip: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
    pub location: Option<String>,
}

impl NewClick {
    /// Materializes the stored event once the store has assigned an id.
    pub fn into_click(self, id: i64) -> Click {
        Click {
            id,
            link_id: self.link_id,
            timestamp: self.timestamp,
            ip: self.ip,
            device: self.device,
            browser: self.browser,
            location: self.location,
        }
    }
}
