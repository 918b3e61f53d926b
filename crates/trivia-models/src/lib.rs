//! # Trivia Models
//!
//! Domain entities shared by the API server and the CLI.
//!
//! - [`ids`]: Strongly-typed integer ids
//! - [`category`]: Question categories
//! - [`question`]: Trivia questions

pub mod category;
pub mod ids;
pub mod question;

pub use category::Category;
pub use ids::{CategoryId, QuestionId};
pub use question::Question;
