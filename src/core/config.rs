//! # Environment Configuration
//!
//! Process-level settings read once at startup. Structured settings (channel
//! directory, classification rules, reference zones) live in the YAML file
//! named by `ANNOUNCER_SETTINGS_PATH`, see [`crate::core::settings`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_LEAD_TIME_MINUTES: u64 = 45;
pub const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 60 * 60;
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Upper bounds keep every derived `Duration` far from overflow
pub const MAX_LEAD_TIME_MINUTES: u64 = 7 * 24 * 60;
pub const MAX_RECONCILE_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 10 * 60;
pub const DEFAULT_SETTINGS_PATH: &str = "announcer.yaml";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub google_api_key: String,
    pub calendar_id: String,
    pub log_level: String,
    pub lead_time_minutes: u64,
    pub reconcile_interval_secs: u64,
    pub max_results: u32,
    pub fetch_timeout_secs: u64,
    pub settings_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let config = Config {
            discord_token: required("DISCORD_TOKEN")?,
            google_api_key: required("GOOGLE_API_KEY")?,
            calendar_id: required("CALENDAR_ID")?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            lead_time_minutes: parse_or(&lookup, "LEAD_TIME_MINUTES", DEFAULT_LEAD_TIME_MINUTES)?,
            reconcile_interval_secs: parse_or(
                &lookup,
                "RECONCILE_INTERVAL_SECS",
                DEFAULT_RECONCILE_INTERVAL_SECS,
            )?,
            max_results: parse_or(&lookup, "CALENDAR_MAX_RESULTS", DEFAULT_MAX_RESULTS)?,
            fetch_timeout_secs: parse_or(
                &lookup,
                "CALENDAR_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?,
            settings_path: lookup("ANNOUNCER_SETTINGS_PATH")
                .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string()),
        };

        check_range("LEAD_TIME_MINUTES", config.lead_time_minutes, MAX_LEAD_TIME_MINUTES)?;
        check_range(
            "RECONCILE_INTERVAL_SECS",
            config.reconcile_interval_secs,
            MAX_RECONCILE_INTERVAL_SECS,
        )?;
        check_range(
            "CALENDAR_TIMEOUT_SECS",
            config.fetch_timeout_secs,
            MAX_FETCH_TIMEOUT_SECS,
        )?;
        if config.max_results == 0 {
            anyhow::bail!("CALENDAR_MAX_RESULTS must be greater than zero");
        }

        Ok(config)
    }

    pub fn lead_time(&self) -> Duration {
        Duration::from_secs(self.lead_time_minutes * 60)
    }

    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_secs(self.reconcile_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn check_range(key: &str, value: u64, max: u64) -> Result<()> {
    if value == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    if value > max {
        anyhow::bail!("{key} must be at most {max}, got {value}");
    }
    Ok(())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        _ => Ok(default),
    }
}
