//! Process-local expense storage. Nothing survives a restart; used for demos
//! and tests.

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::models::{Expense, ExpenseCategory, ValidationError};
use crate::storage::traits::{ExpenseStorage, StorageError};

/// Ordered in-memory collection of expenses.
///
/// Clones share the same collection. Mutating calls take the write lock, so
/// concurrent saves, updates and deletes are serialized.
#[derive(Clone, Default)]
pub struct InMemoryExpenseRepository {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with a couple of expenses dated today
    pub fn with_demo_data() -> Result<Self, ValidationError> {
        let today = Local::now().date_naive();
        let demo = [
            (10000, "Electricity bill", ExpenseCategory::Variable),
            (50000, "Rent", ExpenseCategory::Fixed),
        ];

        let expenses = demo
            .into_iter()
            .map(|(amount, description, category)| Expense::new(amount, description, today, category))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            expenses: Arc::new(RwLock::new(expenses)),
        })
    }
}

#[async_trait]
impl ExpenseStorage for InMemoryExpenseRepository {
    async fn find_all(&self) -> Result<Vec<Expense>, StorageError> {
        Ok(self.expenses.read().await.clone())
    }

    async fn save(&self, expense: &Expense) -> Result<(), StorageError> {
        let mut expenses = self.expenses.write().await;
        if expenses.iter().any(|existing| existing.id() == expense.id()) {
            return Err(StorageError::DuplicateId(expense.id().to_string()));
        }
        expenses.push(expense.clone());
        debug!("Stored expense {} ({} total)", expense.id(), expenses.len());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().find(|expense| expense.id() == id).cloned())
    }

    async fn update(&self, expense: &Expense) -> Result<(), StorageError> {
        let mut expenses = self.expenses.write().await;
        if let Some(existing) = expenses.iter_mut().find(|existing| existing.id() == expense.id()) {
            *existing = expense.clone();
        } else {
            debug!("Update skipped, expense {} is not stored", expense.id());
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.expenses.write().await.retain(|expense| expense.id() != id);
        Ok(())
    }
}
