//! Storage infrastructure - connection handles, schema and backend selection

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageHandle, StorageType};
pub use migrations::{create_tables, drop_tables, Migration, Migrator, PostgresMigrator};
pub use postgres::{Database, PostgresConfig};
