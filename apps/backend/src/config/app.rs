//! Runtime configuration read from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cards::scryfall::DEFAULT_BASE_URL;
use crate::cards::RetryPolicy;
use crate::domain::{Clock, SystemClock, FIRST_CARD_SET_YEAR};
use crate::error::AppError;
use crate::telemetry::LogFormat;

/// Origins allowed when `CORS_ALLOWED_ORIGINS` yields nothing usable.
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CardSourceConfig {
    pub base_url: String,
    pub user_agent: String,
    pub max_attempts: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub card_source: CardSourceConfig,
    pub first_card_set_year: i32,
    pub cors_origins: Vec<String>,
    /// Fixed seed for secret-year draws; OS entropy when unset.
    pub rng_seed: Option<u64>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("CARDYEAR_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&var, "CARDYEAR_PORT", 3001u16)?;

        let max_attempts = parse_var(
            &var,
            "CARD_SOURCE_MAX_ATTEMPTS",
            RetryPolicy::DEFAULT_MAX_ATTEMPTS,
        )?;
        if max_attempts == 0 {
            return Err(AppError::config(
                "CARD_SOURCE_MAX_ATTEMPTS must be at least 1",
            ));
        }
        let timeout_secs = parse_var(&var, "CARD_SOURCE_TIMEOUT_SECS", 10u64)?;
        let card_source = CardSourceConfig {
            base_url: var("CARD_SOURCE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: var("CARD_SOURCE_USER_AGENT")
                .unwrap_or_else(|| format!("cardyear/{}", env!("CARGO_PKG_VERSION"))),
            max_attempts,
            timeout: Duration::from_secs(timeout_secs),
        };

        let first_card_set_year = parse_var(&var, "FIRST_CARD_SET_YEAR", FIRST_CARD_SET_YEAR)?;
        let current_year = SystemClock.current_year();
        if first_card_set_year >= current_year {
            return Err(AppError::config(format!(
                "FIRST_CARD_SET_YEAR must be before {current_year}, got {first_card_set_year}"
            )));
        }

        let rng_seed = match var("CARDYEAR_RNG_SEED") {
            Some(raw) => Some(parse_value("CARDYEAR_RNG_SEED", &raw)?),
            None => None,
        };

        let log_format = match var("CARDYEAR_LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| AppError::config(format!("CARDYEAR_LOG_FORMAT: {e}")))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            card_source,
            first_card_set_year,
            cors_origins: parse_origins(var("CORS_ALLOWED_ORIGINS").as_deref().unwrap_or("")),
            rng_seed,
            log_format,
        })
    }
}

fn parse_var<F, T>(var: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::config(format!("{key} has an invalid value: '{raw}'")))
}

/// Comma-separated origins; empty, `null` and non-http(s) entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    if origins.is_empty() {
        DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}
