//! SQLite storage implementation for Centsible.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `centsible-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod learning;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from centsible-core for convenience
pub use centsible_core::errors::{DatabaseError, Error, Result};
