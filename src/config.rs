// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client configuration loaded from environment variables.

use crate::core::constants::config as keys;
use crate::core::errors::ClientError;
use std::env;

/// Client configuration
///
/// Every field has a default; values that are present are validated on
/// load with clear error messages.
#[derive(Debug, Clone)]
pub struct Config {
    // Service endpoint
    pub base_url: String,

    // Transport timeouts
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,

    // Accept self-signed certificates (the StretchFS test stack ships one)
    pub accept_invalid_certs: bool,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    pub fn from_env() -> Result<Self, ClientError> {
        // Skipped under test so the process environment stays in control
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok();
        }

        let config = Self {
            base_url: Self::get_env_or_default(keys::ENV_BASE_URL, keys::DEFAULT_BASE_URL),
            request_timeout_secs: Self::parse_u64_or_default(
                keys::ENV_REQUEST_TIMEOUT_SECS,
                keys::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: Self::parse_u64_or_default(
                keys::ENV_CONNECT_TIMEOUT_SECS,
                keys::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            accept_invalid_certs: Self::parse_bool_or_default(keys::ENV_ACCEPT_INVALID_CERTS, false)?,
            log_level: Self::get_env_or_default(keys::ENV_LOG_LEVEL, keys::DEFAULT_LOG_LEVEL),
            log_format: Self::get_env_or_default(keys::ENV_LOG_FORMAT, keys::DEFAULT_LOG_FORMAT),
        };

        config.validate()?;

        Ok(config)
    }

    fn get_env_or_default(key: &str, default: &str) -> String {
        match env::var(key) {
            Ok(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    /// Parse a non-zero u64 from an environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, ClientError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    ClientError::Configuration(format!("Invalid {} value '{}': {}", key, value, e))
                })?;

                if parsed == 0 {
                    return Err(ClientError::Configuration(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    fn parse_bool_or_default(key: &str, default: bool) -> Result<bool, ClientError> {
        match env::var(key) {
            Ok(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ClientError::Configuration(format!(
                    "Invalid {} value '{}': expected true or false",
                    key, value
                ))),
            },
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ClientError> {
        Self::validate_url(&self.base_url)?;

        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ClientError::Configuration(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    fn validate_url(url: &str) -> Result<(), ClientError> {
        let parsed = url::Url::parse(url).map_err(|e| {
            ClientError::Configuration(format!("Invalid {} '{}': {}", keys::ENV_BASE_URL, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::Configuration(format!(
                "Invalid {} '{}': scheme must be http or https",
                keys::ENV_BASE_URL,
                url
            )));
        }
        Ok(())
    }

    fn validate_log_level(level: &str) -> Result<(), ClientError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(ClientError::Configuration(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    fn validate_log_format(format: &str) -> Result<(), ClientError> {
        if format != "json" && format != "text" {
            return Err(ClientError::Configuration(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: keys::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: keys::DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: keys::DEFAULT_CONNECT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            log_level: keys::DEFAULT_LOG_LEVEL.to_string(),
            log_format: keys::DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Create a test configuration pointing at a local service
    ///
    /// Bypasses environment variable loading.
    pub fn test_config() -> Self {
        Self {
            base_url: "http://127.0.0.1:8161".to_string(),
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            ..Self::default()
        }
    }
}
