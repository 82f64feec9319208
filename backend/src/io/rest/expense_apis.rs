//! # REST API for Expenses

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::ExpenseDto;
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::ExpenseMapper;
use crate::AppState;

/// Create a router for the expense resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", get(get_expense).put(update_expense).delete(delete_expense))
}

async fn list_expenses(State(state): State<AppState>) -> Result<Json<Vec<ExpenseDto>>, ApiError> {
    info!("GET /expenses");

    let expenses = state.expense_service.list_expenses().await?;
    Ok(Json(expenses.iter().map(ExpenseMapper::to_dto).collect()))
}

async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    info!("POST /expenses - request: {:?}", request);

    let command = ExpenseMapper::to_create_command(request)?;
    let expense = state.expense_service.create_expense(command).await?;

    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_dto(&expense))))
}

async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseDto>, ApiError> {
    info!("GET /expenses/{}", id);

    let expense = state.expense_service.get_expense(&id).await?;
    Ok(Json(ExpenseMapper::to_dto(&expense)))
}

async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseDto>, JsonRejection>,
) -> Result<Json<ExpenseDto>, ApiError> {
    let Json(request) = payload?;
    info!("PUT /expenses/{} - request: {:?}", id, request);

    let command = ExpenseMapper::to_update_command(id, request)?;
    let expense = state.expense_service.update_expense(command).await?;

    Ok(Json(ExpenseMapper::to_dto(&expense)))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /expenses/{}", id);

    state.expense_service.delete_expense(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
