//! Domain-level command types.
//! These are what the services consume; the REST layer maps the public DTOs
//! from the `shared` crate onto them.

pub mod expenses {
    use chrono::NaiveDate;

    use crate::domain::models::ExpenseCategory;

    /// Input for creating a new expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub amount_cents: i64,
        pub description: String,
        pub date: NaiveDate,
        pub category: ExpenseCategory,
    }

    /// Full replacement of an expense's mutable fields.
    #[derive(Debug, Clone)]
    pub struct UpdateExpenseCommand {
        pub id: String,
        pub amount_cents: i64,
        pub description: String,
        pub date: NaiveDate,
        pub category: ExpenseCategory,
    }
}
