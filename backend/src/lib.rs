//! # Finance Manager Backend
//!
//! Expense tracking over an HTTP/JSON API.
//!
//! ```text
//! IO Layer (REST handlers, DTO mapping)
//!     ↓
//! Domain Layer (Expense entity, expense service)
//!     ↓
//! Storage Layer (in-memory or SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{ServerConfig, StorageBackend};
use crate::domain::ExpenseService;
use crate::storage::{DbConnection, ExpenseStorage, InMemoryExpenseRepository, SqliteExpenseRepository};

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
}

/// Build the storage backend named in `config` and the services on top of it
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up {} storage", config.storage);
    let storage: Arc<dyn ExpenseStorage> = match config.storage {
        StorageBackend::Memory if config.seed_demo_data => Arc::new(InMemoryExpenseRepository::with_demo_data()?),
        StorageBackend::Memory => Arc::new(InMemoryExpenseRepository::new()),
        StorageBackend::Sqlite => {
            let db = DbConnection::new(&config.database_url).await?;
            Arc::new(SqliteExpenseRepository::new(db))
        }
    };

    info!("Setting up application state");
    Ok(AppState {
        expense_service: ExpenseService::new(storage),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/expenses", io::rest::expense_apis::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn memory_config() -> ServerConfig {
        ServerConfig {
            storage: StorageBackend::Memory,
            seed_demo_data: true,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_memory_backend_with_demo_data() {
        let state = initialize_backend(&memory_config()).await.unwrap();

        let expenses = state.expense_service.list_expenses().await.unwrap();
        assert_eq!(expenses.len(), 2);
    }

    #[tokio::test]
    async fn test_initialize_sqlite_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            database_url: format!("sqlite:{}", dir.path().join("finance.db").display()),
            ..ServerConfig::default()
        };

        let state = initialize_backend(&config).await.unwrap();
        assert!(state.expense_service.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_router_serves_expenses_with_cors() {
        let state = initialize_backend(&memory_config()).await.unwrap();
        let app = create_router(state, HeaderValue::from_static("http://localhost:8080"));

        let request = Request::builder()
            .uri("/expenses")
            .header(header::ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:8080"
        );

        let request = Request::builder().uri("/unknown").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
