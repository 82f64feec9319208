//! # REST API
//!
//! | Method | Path            | Success             |
//! |--------|-----------------|---------------------|
//! | GET    | /expenses       | 200 list            |
//! | POST   | /expenses       | 201 created record  |
//! | GET    | /expenses/:id   | 200 record          |
//! | PUT    | /expenses/:id   | 200 updated record  |
//! | DELETE | /expenses/:id   | 204 no body         |
//!
//! Failures carry an `{"error": "..."}` body: 400 for malformed input and
//! validation errors, 404 for unknown ids, 500 for storage failures.

pub mod error;
pub mod expense_apis;
pub mod mappers;

pub use error::ApiError;
