//! Repository trait for the append-only click event log.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the Click Event Store.
///
/// Events are never updated or deleted through this interface.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_click.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event and increments the link's `total_clicks`.
    ///
    /// Both writes happen atomically, so a reader never sees the event
    /// without the counter or the counter without the event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Returns every event whose `link_id` is in `link_ids`.
    ///
    /// No time window is applied. An empty `link_ids` yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_link_ids(&self, link_ids: &[i64]) -> Result<Vec<Click>, AppError>;
}
