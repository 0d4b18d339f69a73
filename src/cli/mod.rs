//! CLI module for the user registry
//!
//! Provides subcommands for running the service and managing its schema:
//! - `serve`: HTTP API server
//! - `create-tables` / `drop-tables`: schema management against PostgreSQL

pub mod serve;
pub mod tables;

use clap::{Parser, Subcommand};

/// User registry - CRUD service for user records
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,

    /// Create the users table if it does not exist
    CreateTables,

    /// Drop the users table
    DropTables,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["user-registry"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["user-registry", "create-tables"]).unwrap();
        assert_eq!(cli.command, Some(Command::CreateTables));

        let cli = Cli::try_parse_from(["user-registry", "drop-tables"]).unwrap();
        assert_eq!(cli.command, Some(Command::DropTables));

        let cli = Cli::try_parse_from(["user-registry", "serve"]).unwrap();
        assert_eq!(cli.command, Some(Command::Serve));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["user-registry", "migrate"]).is_err());
    }
}
