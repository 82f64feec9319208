//! Domain model for an expense.
use chrono::{Datelike, NaiveDate};
use shared::{ExpenseDto, DATE_FORMAT};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::money::major_units_from_cents;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("date must be a valid date")]
    InvalidDate,
    #[error("invalid expense category: {0}")]
    InvalidCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Fixed,
    Variable,
    Unplanned,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 3] = [
        ExpenseCategory::Fixed,
        ExpenseCategory::Variable,
        ExpenseCategory::Unplanned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Fixed => "fixed",
            ExpenseCategory::Variable => "variable",
            ExpenseCategory::Unplanned => "unplanned",
        }
    }

    /// Membership test against the closed set of category tags
    pub fn is_valid(tag: &str) -> bool {
        Self::from_tag(tag).is_some()
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == tag)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::from_tag(tag).ok_or_else(|| ValidationError::InvalidCategory(tag.to_string()))
    }
}

/// Returns true for the unset date sentinel, 0001-01-01, and anything earlier.
pub fn is_unset_date(date: NaiveDate) -> bool {
    date.num_days_from_ce() <= 1
}

/// A validated expense.
///
/// Fields are private: every live value went through [`Expense::new`] and
/// each setter re-checks its own field, so `amount > 0` and a set date hold
/// for the whole lifetime of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    id: String,
    amount: i64,
    description: String,
    date: NaiveDate,
    category: ExpenseCategory,
}

impl Expense {
    /// Create an expense with a fresh identifier.
    pub fn new(
        amount_cents: i64,
        description: impl Into<String>,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Result<Self, ValidationError> {
        validate_amount(amount_cents)?;
        validate_date(date)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            amount: amount_cents,
            description: description.into(),
            date,
            category,
        })
    }

    /// Rebuild an expense read back from storage, keeping its persisted id.
    pub(crate) fn restore(
        id: impl Into<String>,
        amount_cents: i64,
        description: impl Into<String>,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Result<Self, ValidationError> {
        let mut expense = Self::new(amount_cents, description, date, category)?;
        expense.assign_id(id);
        Ok(expense)
    }

    /// Overwrite the identifier. Only storage backends reconstituting
    /// persisted rows call this.
    pub(crate) fn assign_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_amount(&mut self, amount_cents: i64) -> Result<(), ValidationError> {
        validate_amount(amount_cents)?;
        self.amount = amount_cents;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), ValidationError> {
        validate_date(date)?;
        self.date = date;
        Ok(())
    }

    pub fn set_category(&mut self, category: ExpenseCategory) {
        self.category = category;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Amount in cents
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> ExpenseCategory {
        self.category
    }

    /// Map to the wire record: major-unit float amount, YYYY-MM-DD date and
    /// the textual category tag.
    pub fn to_transfer_record(&self) -> ExpenseDto {
        ExpenseDto {
            id: Some(self.id.clone()),
            amount: major_units_from_cents(self.amount),
            description: self.description.clone(),
            date: self.date.format(DATE_FORMAT).to_string(),
            category: self.category.as_str().to_string(),
        }
    }
}

fn validate_amount(amount_cents: i64) -> Result<(), ValidationError> {
    if amount_cents <= 0 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(())
}

fn validate_date(date: NaiveDate) -> Result<(), ValidationError> {
    if is_unset_date(date) {
        return Err(ValidationError::InvalidDate);
    }
    Ok(())
}
