//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;
use crate::utils::user_agent::classify_user_agent;

/// An in-memory representation of a redirect waiting to be persisted.
///
/// Passed from the redirect handler to the background worker via a channel,
/// so the HTTP response never waits on the database.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler once the link is resolved
/// 2. Sent to the channel (non-blocking, dropped when full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event timestamped at `clicked_at`.
    pub fn new(
        link_id: i64,
        clicked_at: DateTime<Utc>,
        ip: Option<String>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            clicked_at,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }

    /// Resolves the user agent into device/browser labels.
    pub fn into_new_click(self) -> NewClick {
        let parsed = self
            .user_agent
            .as_deref()
            .map(classify_user_agent)
            .unwrap_or_default();

        NewClick {
            link_id: self.link_id,
            timestamp: self.clicked_at,
            ip: self.ip,
            device: parsed.device,
            browser: parsed.browser,
            location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    #[test]
    fn test_click_event_creation_full() {
        let now = Utc::now();
        let event = ClickEvent::new(42, now, Some("192.168.1.1".to_string()), Some("Mozilla/5.0"));

        assert_eq!(event.link_id, 42);
        assert_eq!(event.clicked_at, now);
        assert_eq!(event.ip, Some("192.168.1.1".to_string()));
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
    }

    #[test]
    fn test_into_new_click_parses_user_agent() {
        let now = Utc::now();
        let new_click =
            ClickEvent::new(7, now, Some("10.0.0.1".to_string()), Some(CHROME_WINDOWS))
                .into_new_click();

        assert_eq!(new_click.link_id, 7);
        assert_eq!(new_click.timestamp, now);
        assert_eq!(new_click.device.as_deref(), Some("desktop"));
        assert_eq!(new_click.browser.as_deref(), Some("Chrome"));
        assert!(new_click.location.is_none());
    }

    #[test]
    fn test_into_new_click_without_user_agent() {
        let new_click = ClickEvent::new(7, Utc::now(), None, None).into_new_click();

        assert!(new_click.device.is_none());
        assert!(new_click.browser.is_none());
        assert!(new_click.ip.is_none());
    }
}
