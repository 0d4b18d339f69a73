//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository, ValidUser, ValidUserPatch};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    /// Highest id ever handed out; ids of deleted rows are not reused
    last_id: i64,
}

/// In-memory implementation of UserRepository.
///
/// A single lock guards the whole table, so every call observes and
/// commits one consistent state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with records, assigning ids from 1
    pub fn with_records(records: Vec<ValidUser>) -> Self {
        let mut table = Table::default();

        for record in records {
            table.last_id += 1;
            let user = User::new(UserId::new(table.last_id), record);
            table.rows.insert(user.id(), user);
        }

        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, record: ValidUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let user = User::new(UserId::new(table.last_id), record);
        table.rows.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, id: UserId, patch: ValidUserPatch) -> Result<Option<User>, DomainError> {
        let mut table = self.table.write().await;

        Ok(table.rows.get_mut(&id).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first_name: &str, email: &str) -> ValidUser {
        ValidUser {
            first_name: first_name.to_string(),
            last_name: "Niklson".to_string(),
            age: 37,
            salary: 270000.0,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(record("Jack", "jack@gmail.com")).await.unwrap();
        let second = repo.create(record("Mindi", "mindi@mail.ru")).await.unwrap();

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips_fields() {
        let repo = InMemoryUserRepository::new();
        let input = record("Jack", "jack@gmail.com");

        let created = repo.create(input.clone()).await.unwrap();
        let fetched = repo.get(created.id()).await.unwrap().unwrap();

        assert_eq!(fetched.first_name(), input.first_name);
        assert_eq!(fetched.last_name(), input.last_name);
        assert_eq!(fetched.age(), input.age);
        assert_eq!(fetched.salary(), input.salary);
        assert_eq!(fetched.email(), input.email);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(record("Jack", "jack@gmail.com")).await.unwrap();
        assert!(repo.delete(first.id()).await.unwrap());

        let second = repo.create(record("Mindi", "mindi@mail.ru")).await.unwrap();
        assert_eq!(second.id(), UserId::new(2));
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let repo = InMemoryUserRepository::with_records(vec![record("Jack", "jack@gmail.com")]);
        let id = UserId::new(1);

        let patch = ValidUserPatch {
            email: Some("new@gmail.com".to_string()),
            ..Default::default()
        };
        let updated = repo.update(id, patch).await.unwrap().unwrap();
        assert_eq!(updated.email(), "new@gmail.com");

        let fetched = repo.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.email(), "new@gmail.com");
        assert_eq!(fetched.first_name(), "Jack");
        assert_eq!(fetched.age(), 37);
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_unchanged() {
        let repo = InMemoryUserRepository::with_records(vec![record("Jack", "jack@gmail.com")]);
        let before = repo.get(UserId::new(1)).await.unwrap();

        let patch = ValidUserPatch {
            first_name: Some("Karl".to_string()),
            ..Default::default()
        };
        assert!(repo.update(UserId::new(999), patch).await.unwrap().is_none());

        assert_eq!(repo.get(UserId::new(1)).await.unwrap(), before);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryUserRepository::with_records(vec![record("Jack", "jack@gmail.com")]);
        let id = UserId::new(1);

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.get(id).await.unwrap().is_none());
    }
}
