//! Configuration management for the storefront service.
//!
//! Loads configuration from environment variables with sensible defaults. The binary reads an
//! optional `.env` file first (via `dotenvy`), so anything set there applies too.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub api: ApiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Default log filter when `RUST_LOG` is not set (trace, debug, info, warn, error)
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Mailbox size of every store actor
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Page size when the request does not give one
    pub default_page_size: usize,
    /// Requested page sizes are capped to this
    pub max_page_size: usize,
    /// Threshold used by the low-stock listing when the request does not give one
    pub low_stock_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "info".to_string(),
            },
            store: StoreConfig {
                channel_capacity: 32,
            },
            api: ApiConfig {
                default_page_size: 10,
                max_page_size: 100,
                low_stock_threshold: 10,
            },
        }
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn at_least_one(var: &'static str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from any variable source. Unset variables take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let channel_capacity = at_least_one(
            "STOREFRONT_CHANNEL_CAPACITY",
            parse(
                &lookup,
                "STOREFRONT_CHANNEL_CAPACITY",
                defaults.store.channel_capacity,
            )?,
        )?;
        let max_page_size = at_least_one(
            "STOREFRONT_MAX_PAGE_SIZE",
            parse(
                &lookup,
                "STOREFRONT_MAX_PAGE_SIZE",
                defaults.api.max_page_size,
            )?,
        )?;
        let default_page_size = at_least_one(
            "STOREFRONT_DEFAULT_PAGE_SIZE",
            parse(
                &lookup,
                "STOREFRONT_DEFAULT_PAGE_SIZE",
                defaults.api.default_page_size,
            )?,
        )?;
        if default_page_size > max_page_size {
            return Err(ConfigError::Invalid {
                var: "STOREFRONT_DEFAULT_PAGE_SIZE",
                value: default_page_size.to_string(),
                reason: format!("must not exceed STOREFRONT_MAX_PAGE_SIZE ({max_page_size})"),
            });
        }

        Ok(Self {
            server: ServerConfig {
                host: lookup("STOREFRONT_HOST").unwrap_or(defaults.server.host),
                port: parse(&lookup, "STOREFRONT_PORT", defaults.server.port)?,
                log_level: lookup("STOREFRONT_LOG_LEVEL").unwrap_or(defaults.server.log_level),
            },
            store: StoreConfig { channel_capacity },
            api: ApiConfig {
                default_page_size,
                max_page_size,
                low_stock_threshold: parse(
                    &lookup,
                    "STOREFRONT_LOW_STOCK_THRESHOLD",
                    defaults.api.low_stock_threshold,
                )?,
            },
        })
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
