use serde::{Deserialize, Serialize};

/// Date format used for every calendar date on the wire (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire representation of a single expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDto {
    /// Server-assigned identifier, absent on create requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Amount in major currency units (e.g. 12.50)
    pub amount: f64,
    /// Free-text label, may be empty
    #[serde(default)]
    pub description: String,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// One of "fixed", "variable" or "unplanned"
    #[serde(alias = "expense_type")]
    pub category: String,
}

/// Body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
