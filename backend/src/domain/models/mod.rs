pub mod expense;
pub mod money;

pub use expense::{Expense, ExpenseCategory, ValidationError};
