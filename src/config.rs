use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://chat.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const MAX_STALE_AFTER_SECS: u64 = i64::MAX as u64 / 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub sweep: SweepConfig,
    pub utc_offset_hours: i8,
    pub logging: LoggingConfig,
}

/// Timing of the inactivity sweep.
///
/// `stale_after` is allowed to be shorter than `interval`; a participant can
/// then stay registered for up to `stale_after + interval` after its last
/// heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub interval: Duration,
    pub stale_after: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            stale_after: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown log format {other:?}, expected pretty or json"),
        }
    }
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
        where
            T: FromStr,
            T::Err: std::fmt::Display,
        {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid {key}={raw:?}: {e}")),
                None => Ok(default),
            }
        }

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let bind_addr = parsed(&lookup, "BIND_ADDR", SocketAddr::from_str(DEFAULT_BIND_ADDR)?)?;

        let defaults = SweepConfig::default();
        let interval: u64 = parsed(&lookup, "SWEEP_INTERVAL_SECS", defaults.interval.as_secs())?;
        let stale_after: u64 = parsed(&lookup, "STALE_AFTER_SECS", defaults.stale_after.as_secs())?;
        if interval == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECS must be positive");
        }
        // thresholds are compared in signed epoch milliseconds
        if stale_after > MAX_STALE_AFTER_SECS {
            anyhow::bail!("STALE_AFTER_SECS={stale_after} exceeds {MAX_STALE_AFTER_SECS}");
        }

        let utc_offset_hours: i8 = parsed(&lookup, "UTC_OFFSET_HOURS", 0)?;
        time::UtcOffset::from_hms(utc_offset_hours, 0, 0)
            .with_context(|| format!("UTC_OFFSET_HOURS={utc_offset_hours} out of range"))?;

        Ok(Config {
            database_url,
            database_max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 16)?,
            bind_addr,
            sweep: SweepConfig {
                interval: Duration::from_secs(interval),
                stale_after: Duration::from_secs(stale_after),
            },
            utc_offset_hours,
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
                format: parsed(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
            },
        })
    }
}
