//! Schema commands - create or drop the users table

use tracing::info;

use crate::config::AppConfig;
use crate::domain::DomainError;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{
    create_tables, drop_tables, Database, PostgresConfig, StorageConfig,
};

/// Schema operation to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Create,
    Drop,
}

/// Connect to the configured database and apply `action`
pub async fn run(action: TableAction) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let pg_config = postgres_config(config.database.storage_config()?)?;
    let database = Database::connect(&pg_config).await?;

    let result = match action {
        TableAction::Create => create_tables(database.pool()).await.map(|_| ()),
        TableAction::Drop => drop_tables(database.pool()).await,
    };
    database.close().await;
    result?;

    info!(action = ?action, "Schema command complete");
    Ok(())
}

fn postgres_config(storage: StorageConfig) -> Result<PostgresConfig, DomainError> {
    match storage {
        StorageConfig::Postgres(pg_config) => Ok(pg_config),
        StorageConfig::InMemory => Err(DomainError::configuration(
            "Schema commands require the postgres backend",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_backend_is_rejected() {
        let err = postgres_config(StorageConfig::in_memory()).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_postgres_backend_is_accepted() {
        let pg = postgres_config(StorageConfig::postgres(PostgresConfig::new("postgres://u:p@h/db"))).unwrap();
        assert_eq!(pg.url, "postgres://u:p@h/db");
    }
}
