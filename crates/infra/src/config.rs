//! Configuration loading and representation.
//!
//! Settings come from the process environment; every key has a default
//! except `DATABASE_URL`, whose absence selects the in-memory store.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DIRECTORY_BASE_URL: &str = "http://user-service";
pub const DEFAULT_DIRECTORY_TRAINEE_PATH: &str = "/user/role/trainee";
pub const DEFAULT_DIRECTORY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// Where and how to reach the employee directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub trainee_path: String,
    pub timeout: Duration,
}

impl DirectoryConfig {
    pub fn trainee_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.trainee_path.trim_start_matches('/')
        )
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTORY_BASE_URL.to_string(),
            trainee_path: DEFAULT_DIRECTORY_TRAINEE_PATH.to_string(),
            timeout: Duration::from_millis(DEFAULT_DIRECTORY_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub directory: DirectoryConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_ms = match get("DIRECTORY_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "DIRECTORY_TIMEOUT_MS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_DIRECTORY_TIMEOUT_MS,
        };

        Ok(Self {
            bind_addr: get("BATCHDESK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: get("DATABASE_URL"),
            directory: DirectoryConfig {
                base_url: get("DIRECTORY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_DIRECTORY_BASE_URL.to_string()),
                trainee_path: get("DIRECTORY_TRAINEE_PATH")
                    .unwrap_or_else(|| DEFAULT_DIRECTORY_TRAINEE_PATH.to_string()),
                timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}
