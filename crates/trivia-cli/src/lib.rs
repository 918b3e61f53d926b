//! # Trivia CLI
//!
//! Database seeding utilities for Trivia development and demos.
//!
//! ## Usage
//!
//! ```ignore
//! use trivia_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::new(50)).await?;
//! ```

pub mod seeder;
