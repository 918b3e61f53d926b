use std::env;

/// Which origins may call the API from a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: AllowedOrigins,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: AllowedOrigins::Any,
        }
    }
}

impl CorsConfig {
    /// Reads `ALLOWED_ORIGINS`, a comma-separated list of origins. Unset,
    /// empty, or `*` permits every origin.
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            return Self::default();
        }

        Self {
            allowed_origins: AllowedOrigins::List(origins),
        }
    }
}
