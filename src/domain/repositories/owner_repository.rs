//! Repository trait for owner accounts.

use crate::domain::entities::{Owner, OwnerId};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for owner accounts.
///
/// Owners are provisioned from the admin CLI; the HTTP API only reads the
/// identity resolved by [`super::TokenRepository::find_owner`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Creates an owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is taken.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create(&self, name: &str) -> Result<Owner, AppError>;

    /// Finds an owner by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_id(&self, id: OwnerId) -> Result<Option<Owner>, AppError>;

    /// Lists all owners, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list(&self) -> Result<Vec<Owner>, AppError>;
}
