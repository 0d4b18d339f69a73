//! User registry
//!
//! A small HTTP service that stores user records with:
//! - Ordered field validation with one reported error per request
//! - PostgreSQL or in-memory storage behind a repository trait
//! - Layered configuration from files and environment

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::storage::StorageHandle;
use infrastructure::user::UserService;

/// Build application state over an opened storage handle
pub fn create_app_state(handle: &StorageHandle) -> AppState {
    let user_service = UserService::new(handle.users.clone());
    AppState::new(Arc::new(user_service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{UserCandidate, UserId, UserRepository};
    use serde_json::json;

    #[tokio::test]
    async fn test_in_memory_app_state() {
        let handle = StorageHandle::in_memory();
        let state = create_app_state(&handle);

        let candidate: UserCandidate = serde_json::from_value(json!({
            "first_name": "Mikle",
            "last_name": "Karlson",
            "age": 27,
            "salary": 10000,
            "email": "mikle_little_cat@gmail.com"
        }))
        .unwrap();

        let user = state.user_service.add(&candidate).await.unwrap();
        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(handle.users.count().await.unwrap(), 1);
    }
}
