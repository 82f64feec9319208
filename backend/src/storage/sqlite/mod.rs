pub mod connection;
pub mod expense_repository;

pub use connection::DbConnection;
pub use expense_repository::SqliteExpenseRepository;
