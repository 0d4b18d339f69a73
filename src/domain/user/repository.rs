//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId, ValidUser, ValidUserPatch};
use crate::domain::DomainError;

/// Repository trait for user storage.
///
/// Every mutating call is its own unit of work: the implementation either
/// commits the full change for the one record it touches or leaves storage
/// untouched. A missing id is reported through the return value, never as
/// an error; errors are reserved for storage failures.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with the id the store assigned
    async fn create(&self, record: ValidUser) -> Result<User, DomainError>;

    /// Apply the supplied fields of `patch`; `None` if the id is absent
    async fn update(&self, id: UserId, patch: ValidUserPatch) -> Result<Option<User>, DomainError>;

    /// Delete a user; `false` if the id is absent
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;
}
