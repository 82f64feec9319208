//! # Storage Module
//!
//! Persistence for expenses behind the [`ExpenseStorage`] port. Two backends
//! exist and one is chosen at startup from configuration:
//!
//! - **memory**: an ordered in-process collection, lost on restart
//! - **sqlite**: the `expenses` table, amounts stored in major units

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::InMemoryExpenseRepository;
pub use sqlite::{DbConnection, SqliteExpenseRepository};
pub use traits::{ExpenseStorage, StorageError};
