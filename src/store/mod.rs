//! Typed record operations over an explicitly passed connection handle.
//!
//! Every operation is a single request-scoped statement (creates re-read
//! the inserted row); SQLite's atomic statement execution is the only
//! concurrency primitive. Cascades live in the schema, not here.

pub mod assignments;
pub mod attendance;
pub mod classes;
pub mod fees;
pub mod notes;
pub mod students;
pub mod teachers;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field or identifier was not provided. Messages are fixed
    /// per entity.
    #[error("{0}")]
    Validation(&'static str),
    /// Credential mismatch or unknown username; deliberately the same
    /// message for both so usernames cannot be enumerated.
    #[error("Invalid credentials")]
    Auth,
    /// The underlying statement failed (constraint violation, malformed
    /// identifier, connectivity). Never retried.
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
