//! # Storage Traits
//!
//! The storage port the domain layer depends on. Backends are picked at
//! startup and handed to the services as `Arc<dyn ExpenseStorage>`.

use async_trait::async_trait;

use crate::domain::models::Expense;

/// Failure inside a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no rows affected while saving expense {0}")]
    NoRowsAffected(String),
    #[error("expense {0} already exists")]
    DuplicateId(String),
    #[error("stored expense {id} is invalid: {reason}")]
    CorruptRecord { id: String, reason: String },
}

/// CRUD contract for expense persistence.
///
/// `find_by_id` reports absence as `Ok(None)` so callers can tell "not found"
/// apart from "storage unavailable". `update` on an unknown id and `delete` on
/// an unknown id are no-ops, never errors, and never create rows.
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// All stored expenses, in no particular order
    async fn find_all(&self) -> Result<Vec<Expense>, StorageError>;

    /// Insert a new expense; fails if nothing was written
    async fn save(&self, expense: &Expense) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError>;

    /// Overwrite every mutable field of the row with a matching id
    async fn update(&self, expense: &Expense) -> Result<(), StorageError>;

    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}
