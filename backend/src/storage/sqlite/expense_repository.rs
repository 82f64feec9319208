use async_trait::async_trait;
use chrono::NaiveDate;
use shared::DATE_FORMAT;
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;

use crate::domain::models::{
    money::{cents_from_stored_major_units, major_units_from_cents},
    Expense, ExpenseCategory,
};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::{ExpenseStorage, StorageError};

const SELECT_COLUMNS: &str = "SELECT id, amount, description, date, expense_type FROM expenses";

/// Expense storage backed by the `expenses` table.
///
/// Each method is a single statement; there are no cross-statement
/// transactions, so a find/modify/update sequence done by a caller can race
/// with a concurrent update of the same id.
#[derive(Clone)]
pub struct SqliteExpenseRepository {
    db: DbConnection,
}

impl SqliteExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_expense(row: &SqliteRow) -> Result<Expense, StorageError> {
        let id: String = row.try_get("id")?;
        let amount: f64 = row.try_get("amount")?;
        let description: Option<String> = row.try_get("description")?;
        let date: String = row.try_get("date")?;
        let category: String = row.try_get("expense_type")?;

        let corrupt = |reason: String| StorageError::CorruptRecord {
            id: id.clone(),
            reason,
        };

        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| corrupt(format!("bad date {:?}: {}", date, e)))?;
        let category: ExpenseCategory = category.parse().map_err(|e| corrupt(format!("{}", e)))?;

        Expense::restore(
            id.clone(),
            cents_from_stored_major_units(amount),
            description.unwrap_or_default(),
            date,
            category,
        )
        .map_err(|e| corrupt(e.to_string()))
    }
}

#[async_trait]
impl ExpenseStorage for SqliteExpenseRepository {
    async fn find_all(&self) -> Result<Vec<Expense>, StorageError> {
        let rows = sqlx::query(SELECT_COLUMNS).fetch_all(self.db.pool()).await?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    async fn save(&self, expense: &Expense) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (id, amount, description, date, expense_type)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id())
        .bind(major_units_from_cents(expense.amount()))
        .bind(expense.description())
        .bind(expense.date().format(DATE_FORMAT).to_string())
        .bind(expense.category().as_str())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NoRowsAffected(expense.id().to_string()));
        }

        debug!("Inserted expense {}", expense.id());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_expense).transpose()
    }

    async fn update(&self, expense: &Expense) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET amount = ?, description = ?, date = ?, expense_type = ?
            WHERE id = ?
            "#,
        )
        .bind(major_units_from_cents(expense.amount()))
        .bind(expense.description())
        .bind(expense.date().format(DATE_FORMAT).to_string())
        .bind(expense.category().as_str())
        .bind(expense.id())
        .execute(self.db.pool())
        .await?;

        debug!("Updated expense {} ({} rows)", expense.id(), result.rows_affected());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
