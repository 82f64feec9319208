//! # Domain Module
//!
//! Business rules for expenses, independent of HTTP and of the storage
//! backend in use.
//!
//! - **models**: the `Expense` entity, its category enumeration and money
//!   conversions
//! - **commands**: inputs to the use cases
//! - **expense_service**: list, create, get, update and delete over an
//!   injected storage port

pub mod commands;
pub mod expense_service;
pub mod models;

pub use expense_service::*;
