//! Storage factory for runtime storage selection

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, UserRepository};
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::migrations::create_tables;
use super::postgres::{Database, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The user repository together with the connection pool backing it, if any.
///
/// Owners call [`StorageHandle::shutdown`] once no more requests will be served.
#[derive(Debug, Clone)]
pub struct StorageHandle {
    pub users: Arc<dyn UserRepository>,
    pub database: Option<Database>,
}

impl StorageHandle {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            database: None,
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self.database {
            Some(_) => StorageType::Postgres,
            None => StorageType::InMemory,
        }
    }

    /// Release the connection pool
    pub async fn shutdown(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the user storage described by the configuration.
    ///
    /// For PostgreSQL this connects the pool and creates missing tables.
    pub async fn create(config: &StorageConfig) -> Result<StorageHandle, DomainError> {
        info!(backend = ?config.storage_type(), "Opening user storage");

        match config {
            StorageConfig::InMemory => Ok(StorageHandle::in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let database = Self::create_postgres(pg_config).await?;
                Ok(StorageHandle {
                    users: Arc::new(PostgresUserRepository::new(database.clone())),
                    database: Some(database),
                })
            }
        }
    }

    /// Connects to PostgreSQL and makes sure the schema is current
    pub async fn create_postgres(config: &PostgresConfig) -> Result<Database, DomainError> {
        let database = Database::connect(config).await?;
        create_tables(database.pool()).await?;
        Ok(database)
    }
}
