//! Environment-driven configuration
//!
//! Settings come from environment variables, with a `.env` file loaded
//! first when present. Command-line flags never override these; the CLI
//! only selects which command runs.

use std::env;
use std::path::Path;
use std::time::Duration;

use crate::defaults;
use crate::error::{AppError, Result};

/// Runtime configuration for the CLI
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the resource API, e.g. `http://localhost:8080/api/v1`
    pub api_base_url: String,
    /// Timeout applied to every API request
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the environment, applying defaults and
    /// validating the result.
    pub fn load() -> Result<Self> {
        // A missing .env file is fine; a malformed one is not.
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("failed to load .env file: {}", e)))?;
        }

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| defaults::DEFAULT_API_BASE_URL.to_string());

        let timeout = match env::var("TIMEOUT_SECONDS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    AppError::config(format!("invalid TIMEOUT_SECONDS value '{}': {}", raw, e))
                })?;
                if secs == 0 {
                    return Err(AppError::config("TIMEOUT_SECONDS must be greater than 0"));
                }
                Duration::from_secs(secs)
            }
            Err(_) => defaults::DEFAULT_TIMEOUT,
        };

        let config = Self {
            api_base_url,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configured values
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(AppError::config("API_BASE_URL is required"));
        }
        url::Url::parse(&self.api_base_url)
            .map_err(|e| AppError::config(format!("invalid API_BASE_URL '{}': {}", self.api_base_url, e)))?;
        Ok(())
    }
}
