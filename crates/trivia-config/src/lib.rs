//! # Trivia Config
//!
//! Configuration types for the Trivia API, loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener address configuration
//!
//! # Example
//!
//! ```ignore
//! use trivia_config::{CorsConfig, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::{AllowedOrigins, CorsConfig};
pub use server::ServerConfig;
