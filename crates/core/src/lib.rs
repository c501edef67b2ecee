//! Centsible Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Centsible: transaction
//! aggregation, savings-goal progress, the financial insights engine, and
//! the learning (course/lesson) domain. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod goals;
pub mod learning;
pub mod transactions;

// Re-export common types from the transaction and dashboard modules
pub use dashboard::*;
pub use transactions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
