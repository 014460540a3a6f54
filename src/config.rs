//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;

use crate::constants::generation;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Gemini API key used by the generation gateway
    pub api_key: String,
    /// Model name passed to `generateContent`
    pub model: String,
    /// Base URL of the Gemini REST API (no trailing slash)
    pub endpoint: String,
    /// Number of slides requested per generation
    pub slide_count: usize,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            api_key: String::new(),
            model: generation::DEFAULT_MODEL.to_string(),
            endpoint: generation::DEFAULT_ENDPOINT.to_string(),
            slide_count: generation::DEFAULT_SLIDE_COUNT,
            request_timeout_secs: generation::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// A bad optional value is logged and that field keeps its default;
    /// it never discards the other fields.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup("API_KEY")
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup("GEMINI_API_KEY"))
        {
            config.api_key = key.trim().to_string();
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }

        if let Some(endpoint) = lookup("GEMINI_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().trim_end_matches('/').to_string();
            }
        }

        if let Some(count) = lookup("GENERATION_COUNT") {
            match parse_positive("GENERATION_COUNT", &count) {
                Ok(n) => config.slide_count = n,
                Err(e) => tracing::warn!("Keeping default slide count: {}", e),
            }
        }

        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            match parse_positive("REQUEST_TIMEOUT_SECS", &secs) {
                Ok(n) => config.request_timeout_secs = n,
                Err(e) => tracing::warn!("Keeping default request timeout: {}", e),
            }
        }

        tracing::debug!(model = %config.model, has_key = config.has_api_key(), "configuration loaded");
        config
    }

    /// Check if the generation credential is configured
    pub const fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn parse_positive<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(Error::config(
            format!("{name} must be a positive integer, got {raw:?}"),
            "Unset the variable to use the default",
        )),
    }
}
