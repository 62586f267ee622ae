//! Client configuration.
//!
//! The base URL is resolved once, when the configuration is built, from
//! `PROCEDURE_API_BASE_URL`. Surrounding whitespace is ignored, and an unset,
//! empty or blank variable falls back to the local development backend.

use std::env;

/// Environment variable holding the catalog API base URL.
pub const BASE_URL_ENV: &str = "PROCEDURE_API_BASE_URL";

/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the base URL through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_uses_default() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn empty_variable_uses_default() {
        let config = ClientConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn whitespace_only_variable_uses_default() {
        let config = ClientConfig::from_lookup(|_| Some("  \t".to_string()));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn padded_variable_is_trimmed() {
        let config = ClientConfig::from_lookup(|_| Some(" http://catalog:9000/ \n".to_string()));
        assert_eq!(config.base_url(), "http://catalog:9000");
    }

    #[test]
    fn variable_overrides_default() {
        let config = ClientConfig::from_lookup(|key| {
            assert_eq!(key, BASE_URL_ENV);
            Some("https://catalog.example.org/api/".to_string())
        });
        assert_eq!(config.base_url(), "https://catalog.example.org/api");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url(), "http://localhost:8000");
    }
}
