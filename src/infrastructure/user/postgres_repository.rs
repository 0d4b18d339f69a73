//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::Row;
use tracing::debug;

use crate::domain::user::{User, UserId, UserRepository, ValidUser, ValidUserPatch};
use crate::domain::DomainError;
use crate::infrastructure::storage::Database;

/// PostgreSQL implementation of UserRepository.
///
/// Each mutating call begins a transaction from the pool and commits it only
/// after every statement succeeded; an early return drops the transaction,
/// which rolls it back.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    database: Database,
}

impl PostgresUserRepository {
    /// Create a new repository over the given connection handle
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, age, salary, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(self.database.pool())
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, record: ValidUser) -> Result<User, DomainError> {
        let mut tx = self.database.pool().begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, age, salary, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.age)
        .bind(record.salary)
        .bind(&record.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create user: {}", e)))?;

        tx.commit().await?;
        debug!(user_id = id, "User row inserted");

        Ok(User::new(UserId::new(id), record))
    }

    async fn update(&self, id: UserId, patch: ValidUserPatch) -> Result<Option<User>, DomainError> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut tx = self.database.pool().begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                age = COALESCE($4, age),
                salary = COALESCE($5, salary),
                email = COALESCE($6, email)
            WHERE id = $1
            RETURNING id, first_name, last_name, age, salary, email
            "#,
        )
        .bind(id.value())
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.age)
        .bind(patch.salary)
        .bind(patch.email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user = row_to_user(&row)?;
        tx.commit().await?;

        Ok(Some(user))
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut tx = self.database.pool().begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.database.pool())
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid user row in database: {}", e));

    let id: i64 = row.try_get("id").map_err(read)?;
    let first_name: String = row.try_get("first_name").map_err(read)?;
    let last_name: String = row.try_get("last_name").map_err(read)?;
    let age: i32 = row.try_get("age").map_err(read)?;
    let salary: Option<f64> = row.try_get("salary").map_err(read)?;
    let email: Option<String> = row.try_get("email").map_err(read)?;

    Ok(User::new(
        UserId::new(id),
        ValidUser {
            first_name,
            last_name,
            age,
            salary: salary.unwrap_or_default(),
            email: email.unwrap_or_default(),
        },
    ))
}
