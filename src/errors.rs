//! Unified error types for `Paybook`.
//!
//! One enum covers the whole engine: domain preconditions (`Validation`,
//! `InvalidAmount`), targeted lookups that miss (`EmployeeNotFound`,
//! `EntryNotFound`), configuration problems, and store failures. Store
//! failures are wrapped once and propagated unchanged; the engine never
//! retries internally.

use thiserror::Error;

/// Engine-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied data violates a domain precondition.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the violated precondition
        message: String,
    },

    /// A monetary or hour amount is negative or non-finite where it must not be.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// The referenced employee does not exist (or has been deleted).
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// Employee ID that failed to resolve
        id: i64,
    },

    /// A targeted update/delete referenced a record that does not exist.
    #[error("{entity} not found: {key}")]
    EntryNotFound {
        /// Kind of record ("bank salary entry", "payment", ...)
        entity: &'static str,
        /// Identity that failed to resolve, formatted for display
        key: String,
    },

    /// Configuration error (config file, environment).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what failed to load or parse
        message: String,
    },

    /// Database error from the underlying store, propagated unchanged.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
