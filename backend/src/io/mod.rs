//! # IO Module
//!
//! Adapter between HTTP clients and the domain layer: JSON (de)serialization,
//! DTO to command mapping, and domain error to status code translation.

pub mod rest;

pub use rest::*;
