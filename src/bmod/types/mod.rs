//! Foundational data structures, error types, and format definitions.

pub mod error;
pub mod formats;
pub mod models;
