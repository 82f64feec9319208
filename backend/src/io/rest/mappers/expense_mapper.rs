use chrono::NaiveDate;
use shared::{ExpenseDto, DATE_FORMAT};

use crate::domain::commands::expenses::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::models::{money::cents_from_major_units, Expense, ExpenseCategory};
use crate::io::rest::error::ApiError;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: &Expense) -> ExpenseDto {
        expense.to_transfer_record()
    }

    pub fn to_create_command(dto: ExpenseDto) -> Result<CreateExpenseCommand, ApiError> {
        Ok(CreateExpenseCommand {
            amount_cents: Self::parse_amount(dto.amount)?,
            date: Self::parse_date(&dto.date)?,
            category: Self::parse_category(&dto.category)?,
            description: dto.description,
        })
    }

    /// The path id wins over any id carried in the body
    pub fn to_update_command(id: String, dto: ExpenseDto) -> Result<UpdateExpenseCommand, ApiError> {
        Ok(UpdateExpenseCommand {
            id,
            amount_cents: Self::parse_amount(dto.amount)?,
            date: Self::parse_date(&dto.date)?,
            category: Self::parse_category(&dto.category)?,
            description: dto.description,
        })
    }

    fn parse_amount(amount: f64) -> Result<i64, ApiError> {
        cents_from_major_units(amount)
            .ok_or_else(|| ApiError::BadRequest("amount is out of range".to_string()))
    }

    fn parse_date(date: &str) -> Result<NaiveDate, ApiError> {
        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ApiError::BadRequest("invalid date format, expected YYYY-MM-DD".to_string()))
    }

    fn parse_category(tag: &str) -> Result<ExpenseCategory, ApiError> {
        tag.parse::<ExpenseCategory>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}
