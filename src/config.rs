use std::env;

use chrono::{FixedOffset, Offset, Utc};
use log::*;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
/// Asia/Kolkata. Cancellation times are reported in this zone.
const DEFAULT_REPORTING_OFFSET_MINUTES: i32 = 330;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_max_size: u32,
    /// Fixed offset used when rendering cancellation timestamps for humans.
    pub reporting_offset: FixedOffset,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests do not have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let pool_max_size = parse_or(&lookup, "DB_POOL_MAX_SIZE", DEFAULT_POOL_MAX_SIZE)?;
        if pool_max_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_MAX_SIZE",
                value: "0".to_string(),
                reason: "the pool needs at least one connection".to_string(),
            });
        }
        let offset_minutes = parse_or(
            &lookup,
            "REPORTING_UTC_OFFSET_MINUTES",
            DEFAULT_REPORTING_OFFSET_MINUTES,
        )?;
        let reporting_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                key: "REPORTING_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
                reason: "offset must be within ±24 hours".to_string(),
            })?;

        debug!("Loaded configuration for {host}:{port} (pool size {pool_max_size})");
        Ok(Self {
            host,
            port,
            database_url,
            pool_max_size,
            reporting_offset,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: String::default(),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            reporting_offset: default_reporting_offset(),
        }
    }
}

pub fn default_reporting_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_REPORTING_OFFSET_MINUTES * 60)
        .unwrap_or_else(|| Utc.fix())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
