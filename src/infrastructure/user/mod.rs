//! User infrastructure module
//!
//! This module provides the storage backends for user records (PostgreSQL
//! and in-memory) and the service that validates records before they reach
//! either of them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{UserService, UserServiceError, UserUpdateError};
