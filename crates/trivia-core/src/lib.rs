//! # Trivia Core
//!
//! Core types, errors, and utilities for the Trivia API.
//!
//! - [`errors`]: Application error type rendered as the uniform JSON error body
//! - [`pagination`]: Fixed-size page windows over id-ordered result sets
//! - [`serde`]: Lenient deserializers for query parameters and request ids
//!
//! # Example
//!
//! ```ignore
//! use trivia_core::errors::AppError;
//! use trivia_core::pagination::PageParams;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Question 42 not found"));
//!
//! let params = PageParams::default();
//! let window = params.window();
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use pagination::{PageParams, PageWindow, QUESTIONS_PER_PAGE};
