//! # Configuration
//!
//! Endpoint, timeout and storage settings. Values come from an optional YAML
//! file (`REMINDER_CONFIG`) and are then overridden by environment variables.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: YAML overlay file and `DELETE`-based cancel mode
//! - 1.0.0: Environment-only configuration

use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SCHEDULE_URL: &str = "http://127.0.0.1:3421/api/v1/appointment/schedule";
pub const DEFAULT_CANCEL_URL: &str = "http://127.0.0.1:3421/api/v1/appointment/cancel";

/// How the cancel request reaches the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelMode {
    /// `POST` to the dedicated cancel URL
    #[default]
    Post,
    /// `DELETE` on the schedule URL
    Delete,
}

impl std::str::FromStr for CancelMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "post" => Ok(CancelMode::Post),
            "delete" => Ok(CancelMode::Delete),
            other => Err(anyhow!("Unknown cancel mode '{other}' (expected post or delete)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schedule_url: String,
    pub cancel_url: String,
    pub cancel_mode: CancelMode,
    pub schedule_timeout_ms: u64,
    pub cancel_timeout_ms: u64,
    /// How long a success confirmation stays up before the form re-enables
    pub status_timeout_ms: u64,
    pub sweep_interval_secs: u64,
    /// Path of the sqlite file holding persisted form fields
    pub store_path: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            cancel_url: DEFAULT_CANCEL_URL.to_string(),
            cancel_mode: CancelMode::Post,
            schedule_timeout_ms: 20_000,
            cancel_timeout_ms: 10_000,
            status_timeout_ms: 2_000,
            sweep_interval_secs: 5,
            store_path: "reminder-form.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Build the configuration from `REMINDER_CONFIG` (if set) and the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary lookup. The result is
    /// already validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("REMINDER_CONFIG") {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `REMINDER_*` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REMINDER_SCHEDULE_URL") {
            self.schedule_url = url;
        }
        if let Some(url) = lookup("REMINDER_CANCEL_URL") {
            self.cancel_url = url;
        }
        if let Some(mode) = lookup("REMINDER_CANCEL_MODE") {
            self.cancel_mode = mode.parse()?;
        }
        if let Some(ms) = lookup("REMINDER_SCHEDULE_TIMEOUT_MS") {
            self.schedule_timeout_ms = parse_number("REMINDER_SCHEDULE_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("REMINDER_CANCEL_TIMEOUT_MS") {
            self.cancel_timeout_ms = parse_number("REMINDER_CANCEL_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("REMINDER_STATUS_TIMEOUT_MS") {
            self.status_timeout_ms = parse_number("REMINDER_STATUS_TIMEOUT_MS", &ms)?;
        }
        if let Some(secs) = lookup("REMINDER_SWEEP_INTERVAL_SECS") {
            self.sweep_interval_secs = parse_number("REMINDER_SWEEP_INTERVAL_SECS", &secs)?;
        }
        if let Some(path) = lookup("REMINDER_STORE_PATH") {
            self.store_path = path;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("schedule_url", &self.schedule_url), ("cancel_url", &self.cancel_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("{name} must be an http(s) URL: {url}"));
            }
        }

        if self.schedule_timeout_ms == 0 || self.cancel_timeout_ms == 0 {
            return Err(anyhow!("Request timeouts must be greater than zero"));
        }

        if self.sweep_interval_secs == 0 {
            return Err(anyhow!("sweep_interval_secs must be greater than zero"));
        }

        if self.schedule_timeout_ms <= self.cancel_timeout_ms {
            warn!(
                "Schedule timeout ({} ms) is not longer than cancel timeout ({} ms)",
                self.schedule_timeout_ms, self.cancel_timeout_ms
            );
        }

        Ok(())
    }

    pub fn schedule_timeout(&self) -> Duration {
        Duration::from_millis(self.schedule_timeout_ms)
    }

    pub fn cancel_timeout(&self) -> Duration {
        Duration::from_millis(self.cancel_timeout_ms)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a non-negative integer, got '{value}'"))
}
