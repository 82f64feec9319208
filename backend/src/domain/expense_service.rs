use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::expenses::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::models::{Expense, ValidationError};
use crate::storage::traits::{ExpenseStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ExpenseServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("expense not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Expense use cases over an injected storage backend
#[derive(Clone)]
pub struct ExpenseService {
    storage: Arc<dyn ExpenseStorage>,
}

impl ExpenseService {
    pub fn new(storage: Arc<dyn ExpenseStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, ExpenseServiceError> {
        let expenses = self.storage.find_all().await?;
        info!("Found {} expenses", expenses.len());
        Ok(expenses)
    }

    /// Validate and store a new expense. Nothing reaches storage unless the
    /// entity is valid.
    pub async fn create_expense(&self, command: CreateExpenseCommand) -> Result<Expense, ExpenseServiceError> {
        info!(
            "Creating expense: amount={} cents, date={}, category={}",
            command.amount_cents, command.date, command.category
        );

        let expense = Expense::new(command.amount_cents, command.description, command.date, command.category)?;
        self.storage.save(&expense).await?;

        info!("Created expense {}", expense.id());
        Ok(expense)
    }

    pub async fn get_expense(&self, id: &str) -> Result<Expense, ExpenseServiceError> {
        self.find_existing(id).await
    }

    /// Replace every mutable field of a stored expense.
    ///
    /// Works on a copy read from storage and writes it back, so a validation
    /// failure leaves the stored row untouched.
    pub async fn update_expense(&self, command: UpdateExpenseCommand) -> Result<Expense, ExpenseServiceError> {
        info!("Updating expense {}", command.id);

        let mut expense = self.find_existing(&command.id).await?;
        expense.set_amount(command.amount_cents)?;
        expense.set_date(command.date)?;
        expense.set_category(command.category);
        expense.set_description(command.description);

        self.storage.update(&expense).await?;

        info!("Updated expense {}", expense.id());
        Ok(expense)
    }

    pub async fn delete_expense(&self, id: &str) -> Result<(), ExpenseServiceError> {
        info!("Deleting expense {}", id);

        self.find_existing(id).await?;
        self.storage.delete(id).await?;

        info!("Deleted expense {}", id);
        Ok(())
    }

    async fn find_existing(&self, id: &str) -> Result<Expense, ExpenseServiceError> {
        match self.storage.find_by_id(id).await? {
            Some(expense) => Ok(expense),
            None => {
                warn!("Expense not found: {}", id);
                Err(ExpenseServiceError::NotFound(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExpenseCategory;
    use crate::storage::memory::InMemoryExpenseRepository;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Storage double that counts calls and can be told to fail
    #[derive(Default)]
    struct RecordingStorage {
        inner: InMemoryExpenseRepository,
        calls: AtomicUsize,
        fail: bool,
    }

    impl RecordingStorage {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn record(&self) -> Result<(), StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StorageError::NoRowsAffected("forced failure".to_string()));
            }
            Ok(())
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExpenseStorage for RecordingStorage {
        async fn find_all(&self) -> Result<Vec<Expense>, StorageError> {
            self.record()?;
            self.inner.find_all().await
        }

        async fn save(&self, expense: &Expense) -> Result<(), StorageError> {
            self.record()?;
            self.inner.save(expense).await
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError> {
            self.record()?;
            self.inner.find_by_id(id).await
        }

        async fn update(&self, expense: &Expense) -> Result<(), StorageError> {
            self.record()?;
            self.inner.update(expense).await
        }

        async fn delete(&self, id: &str) -> Result<(), StorageError> {
            self.record()?;
            self.inner.delete(id).await
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn create_command(amount_cents: i64) -> CreateExpenseCommand {
        CreateExpenseCommand {
            amount_cents,
            description: "Electricity bill".to_string(),
            date: test_date(),
            category: ExpenseCategory::Variable,
        }
    }

    fn create_test_service() -> ExpenseService {
        ExpenseService::new(Arc::new(InMemoryExpenseRepository::new()))
    }

    #[tokio::test]
    async fn test_create_expense() {
        let service = create_test_service();

        let expense = service.create_expense(create_command(8500)).await.unwrap();
        let record = expense.to_transfer_record();

        assert_eq!(record.amount, 85.0);
        assert_eq!(record.description, "Electricity bill");
        assert_eq!(record.date, "2024-03-01");
        assert_eq!(record.category, "variable");

        let stored = service.get_expense(expense.id()).await.unwrap();
        assert_eq!(stored, expense);
    }

    #[tokio::test]
    async fn test_invalid_expense_never_reaches_storage() {
        let storage = Arc::new(RecordingStorage::default());
        let service = ExpenseService::new(storage.clone());

        let result = service.create_expense(create_command(0)).await;

        assert!(matches!(
            result,
            Err(ExpenseServiceError::Validation(ValidationError::InvalidAmount))
        ));
        assert_eq!(storage.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let service = create_test_service();
        assert!(service.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_expense() {
        let service = create_test_service();

        let result = service.get_expense("missing").await;
        assert!(matches!(result, Err(ExpenseServiceError::NotFound(ref id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_update_category_keeps_other_fields() {
        let service = create_test_service();
        let created = service.create_expense(create_command(8500)).await.unwrap();

        let updated = service
            .update_expense(UpdateExpenseCommand {
                id: created.id().to_string(),
                amount_cents: created.amount(),
                description: created.description().to_string(),
                date: created.date(),
                category: ExpenseCategory::Fixed,
            })
            .await
            .unwrap();
        assert_eq!(updated.category(), ExpenseCategory::Fixed);

        let stored = service.get_expense(created.id()).await.unwrap();
        assert_eq!(stored.category(), ExpenseCategory::Fixed);
        assert_eq!(stored.id(), created.id());
        assert_eq!(stored.amount(), created.amount());
        assert_eq!(stored.description(), created.description());
        assert_eq!(stored.date(), created.date());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_stored_expense_unchanged() {
        let service = create_test_service();
        let created = service.create_expense(create_command(8500)).await.unwrap();

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: created.id().to_string(),
                amount_cents: -100,
                description: "Changed".to_string(),
                date: test_date(),
                category: ExpenseCategory::Unplanned,
            })
            .await;

        assert!(matches!(
            result,
            Err(ExpenseServiceError::Validation(ValidationError::InvalidAmount))
        ));
        assert_eq!(service.get_expense(created.id()).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_missing_expense() {
        let service = create_test_service();

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: "missing".to_string(),
                amount_cents: 100,
                description: String::new(),
                date: test_date(),
                category: ExpenseCategory::Fixed,
            })
            .await;

        assert!(matches!(result, Err(ExpenseServiceError::NotFound(_))));
        assert!(service.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let service = create_test_service();
        let created = service.create_expense(create_command(8500)).await.unwrap();

        service.delete_expense(created.id()).await.unwrap();

        assert!(matches!(
            service.get_expense(created.id()).await,
            Err(ExpenseServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_expense(created.id()).await,
            Err(ExpenseServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let service = ExpenseService::new(Arc::new(RecordingStorage::failing()));

        assert!(matches!(service.list_expenses().await, Err(ExpenseServiceError::Storage(_))));
        assert!(matches!(
            service.create_expense(create_command(100)).await,
            Err(ExpenseServiceError::Storage(_))
        ));
        assert!(matches!(service.get_expense("any").await, Err(ExpenseServiceError::Storage(_))));
    }
}
