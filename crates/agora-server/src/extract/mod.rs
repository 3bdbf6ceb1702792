//! Enhanced HTTP request extractors with improved error handling and validation.
//!
//! Drop-in replacements for the standard Axum extractors that reject with the
//! handler error layer instead of Axum's plain-text defaults, so every error
//! a client sees has the same JSON shape.
//!
//! - [`Json`] - JSON deserialization with descriptive error responses
//! - [`ValidateJson`] - JSON extraction with automatic `validator` validation
//! - [`Path`] - Path parameter extraction with detailed error context
//! - [`Query`] - Query parameter extraction with descriptive error responses

pub mod reject;

pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
