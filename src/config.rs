//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `AURA_STORAGE_DIR` - Directory backing [`FileStorage`](crate::FileStorage) (default: `.aura-storage`)
//! - `AURA_PAGE_SIZE` - Products per catalog page (default: 6)
//! - `AURA_PAYMENT_DELAY_MS` - Simulated payment processing time (default: 3000)
//! - `AURA_EMPTY_CART_REDIRECT_MS` - How long an empty checkout page waits before leaving (default: 2000)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::DEFAULT_PAGE_SIZE;

const DEFAULT_STORAGE_DIR: &str = ".aura-storage";
const DEFAULT_PAYMENT_DELAY_MS: u64 = 3000;
const DEFAULT_EMPTY_CART_REDIRECT_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub page_size: usize,
    pub payment_delay: Duration,
    pub empty_cart_redirect_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
            empty_cart_redirect_delay: Duration::from_millis(DEFAULT_EMPTY_CART_REDIRECT_MS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("AURA_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);

        let page_size = parse_or(&lookup, "AURA_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar("AURA_PAGE_SIZE".into(), "must be at least 1".into()));
        }

        let payment_delay = parse_or(&lookup, "AURA_PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS)?;
        let redirect_delay = parse_or(&lookup, "AURA_EMPTY_CART_REDIRECT_MS", DEFAULT_EMPTY_CART_REDIRECT_MS)?;

        Ok(Self {
            storage_dir,
            page_size,
            payment_delay: Duration::from_millis(payment_delay),
            empty_cart_redirect_delay: Duration::from_millis(redirect_delay),
        })
    }

    /// No artificial delays. Handy for tests and scripted sessions.
    #[must_use]
    pub fn instant() -> Self {
        Self { payment_delay: Duration::ZERO, empty_cart_redirect_delay: Duration::ZERO, ..Self::default() }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
