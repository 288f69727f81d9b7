//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file by `dotenvy` in `main`.

use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
const DEFAULT_FROM_ADDRESS: &str = "Devis <onboarding@resend.dev>";
const DEFAULT_BUSINESS_ADDRESS: &str = "contact@example.com";
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// No key means demo mode
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub from_address: String,
    /// Receives a notification for every quote
    pub business_address: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "BIND_ADDR",
                    value,
                })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let timeout_secs = match get("MAIL_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MAIL_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_MAIL_TIMEOUT_SECS,
        };

        Ok(Config {
            bind_addr,
            mail: MailConfig {
                resend_api_key: get("RESEND_API_KEY"),
                resend_api_url: get("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
                from_address: get("QUOTE_FROM_ADDRESS")
                    .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
                business_address: get("BUSINESS_EMAIL")
                    .unwrap_or_else(|| DEFAULT_BUSINESS_ADDRESS.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
