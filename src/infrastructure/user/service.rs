//! User service: validation in front of the repository

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::user::{
    validate_user, validate_user_patch, FieldError, User, UserCandidate, UserId, UserPatch,
    UserRepository, ValidUser,
};
use crate::domain::DomainError;

/// Errors a user operation can end with
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// A field rule rejected the submitted record
    #[error(transparent)]
    Invalid(#[from] FieldError),

    /// A validated record still had an empty field when it reached storage
    #[error("User record is incomplete")]
    Incomplete,

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Errors an update can end with
#[derive(Debug, Error)]
pub enum UserUpdateError {
    /// A field rule rejected one of the supplied fields
    #[error(transparent)]
    Invalid(#[from] FieldError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// User service for CRUD over validated records
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let user = self.repository.get(id).await?;

        if user.is_none() {
            info!(user_id = %id, "Attempt to read a user that does not exist");
        }

        Ok(user)
    }

    /// Validate and store a new user
    pub async fn add(&self, candidate: &UserCandidate) -> Result<User, UserServiceError> {
        let record = validate_user(candidate)?;

        if !is_complete(&record) {
            debug!("Refusing to store an incomplete user record");
            return Err(UserServiceError::Incomplete);
        }

        let user = self.repository.create(record).await?;
        info!(user_id = %user.id(), "User added");

        Ok(user)
    }

    /// Validate the supplied fields and apply them; `None` if the id is absent
    pub async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserUpdateError> {
        let patch = validate_user_patch(patch)?;
        let user = self.repository.update(id, patch).await?;

        match &user {
            Some(_) => info!(user_id = %id, "User updated"),
            None => info!(user_id = %id, "Attempt to update a user that does not exist"),
        }

        Ok(user)
    }

    /// Delete a user; `false` if the id is absent
    pub async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let deleted = self.repository.delete(id).await?;

        if deleted {
            info!(user_id = %id, "User deleted");
        } else {
            info!(user_id = %id, "Attempt to delete a user that does not exist");
        }

        Ok(deleted)
    }

    /// Count stored users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

/// Storage-side guard: no text field may be blank.
///
/// The field rules already guarantee this; zero age and zero salary are
/// legitimate values and are not treated as missing.
fn is_complete(record: &ValidUser) -> bool {
    !record.first_name.is_empty() && !record.last_name.is_empty() && !record.email.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use serde_json::json;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Route this thread's events into a buffer until the guard drops
    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();

        (logs, tracing::subscriber::set_default(subscriber))
    }

    fn create_service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn mikle() -> UserCandidate {
        UserCandidate {
            first_name: "Mikle".to_string(),
            last_name: "Karlson".to_string(),
            age: json!(27),
            salary: json!(10000),
            email: "mikle_little_cat@gmail.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let service = create_service();

        let created = service.add(&mikle()).await.unwrap();
        let fetched = service.get(created.id()).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.first_name(), "Mikle");
        assert_eq!(fetched.last_name(), "Karlson");
        assert_eq!(fetched.age(), 27);
        assert_eq!(fetched.salary(), 10000.0);
        assert_eq!(fetched.email(), "mikle_little_cat@gmail.com");
    }

    #[tokio::test]
    async fn test_add_invalid_never_reaches_store() {
        let service = create_service();
        let mut candidate = mikle();
        candidate.email = "karl_little_catcom".to_string();

        let result = service.add(&candidate).await;
        assert!(matches!(
            result,
            Err(UserServiceError::Invalid(FieldError::EmailMalformed))
        ));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_accepts_zero_age_and_salary() {
        let service = create_service();
        let mut candidate = mikle();
        candidate.age = json!(0);
        candidate.salary = json!(0);

        let user = service.add(&candidate).await.unwrap();
        assert_eq!(user.age(), 0);
        assert_eq!(user.salary(), 0.0);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let service = create_service();
        assert!(service.get(UserId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_single_field() {
        let service = create_service();
        let created = service.add(&mikle()).await.unwrap();

        let patch = UserPatch {
            salary: Some(json!(15000.5)),
            ..Default::default()
        };
        service.update(created.id(), &patch).await.unwrap().unwrap();

        let fetched = service.get(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched.salary(), 15000.5);
        assert_eq!(fetched.first_name(), created.first_name());
        assert_eq!(fetched.last_name(), created.last_name());
        assert_eq!(fetched.age(), created.age());
        assert_eq!(fetched.email(), created.email());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let service = create_service();
        let created = service.add(&mikle()).await.unwrap();

        let patch = UserPatch {
            first_name: Some("Karl".to_string()),
            ..Default::default()
        };
        let result = service.update(UserId::new(999), &patch).await.unwrap();
        assert!(result.is_none());

        let unchanged = service.get(created.id()).await.unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn test_update_invalid_is_rejected_without_effect() {
        let service = create_service();
        let created = service.add(&mikle()).await.unwrap();

        let patch = UserPatch {
            first_name: Some("Karl".to_string()),
            age: Some(json!(125)),
            ..Default::default()
        };
        let result = service.update(created.id(), &patch).await;
        assert!(matches!(
            result,
            Err(UserUpdateError::Invalid(FieldError::AgeOutOfRange))
        ));

        let unchanged = service.get(created.id()).await.unwrap().unwrap();
        assert_eq!(unchanged.first_name(), "Mikle");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = create_service();
        let created = service.add(&mikle()).await.unwrap();

        assert!(service.delete(created.id()).await.unwrap());
        assert!(!service.delete(created.id()).await.unwrap());
        assert!(service.get(created.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let repo = Arc::new(MockUserRepository::new());
        repo.set_should_fail(true).await;
        let service = UserService::new(repo);

        let result = service.add(&mikle()).await;
        assert!(matches!(result, Err(UserServiceError::Storage(_))));

        let result = service.get(UserId::new(1)).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_missing_id_access_is_logged() {
        let service = create_service();
        let (logs, _guard) = capture_logs();

        service.get(UserId::new(41)).await.unwrap();
        service
            .update(UserId::new(42), &UserPatch::default())
            .await
            .unwrap();
        service.delete(UserId::new(43)).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("Attempt to read a user that does not exist"));
        assert!(output.contains("Attempt to update a user that does not exist"));
        assert!(output.contains("Attempt to delete a user that does not exist"));
        assert!(output.contains("INFO"));
        assert!(output.contains("41"));
        assert!(output.contains("42"));
        assert!(output.contains("43"));
    }

    #[tokio::test]
    async fn test_present_id_access_is_not_reported_missing() {
        let service = create_service();
        let created = service.add(&mikle()).await.unwrap();
        let (logs, _guard) = capture_logs();

        service.get(created.id()).await.unwrap();
        service.delete(created.id()).await.unwrap();

        let output = logs.contents();
        assert!(!output.contains("does not exist"));
        assert!(output.contains("User deleted"));
    }

    #[test]
    fn test_is_complete() {
        let mut record = ValidUser {
            first_name: "Mikle".to_string(),
            last_name: "Karlson".to_string(),
            age: 0,
            salary: 0.0,
            email: "m@gmail.com".to_string(),
        };
        assert!(is_complete(&record));

        record.email.clear();
        assert!(!is_complete(&record));
    }
}
