//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{User, UserCandidate, UserId, UserPatch};
use crate::domain::DomainError;
use crate::infrastructure::user::{UserService, UserServiceError, UserUpdateError};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn add(&self, candidate: &UserCandidate) -> Result<User, UserServiceError>;
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, UserUpdateError>;
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn add(&self, candidate: &UserCandidate) -> Result<User, UserServiceError> {
        UserService::add(self, candidate).await
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, UserUpdateError> {
        UserService::update(self, id, patch).await
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        UserService::delete(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}
