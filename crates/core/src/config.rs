// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable run configuration.
//!
//! Built once at startup from an optional TOML file plus `BATON_*`
//! environment overrides, then passed down explicitly. Nothing reads
//! configuration from globals after this point.

use crate::env;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default safety margin subtracted from the host ceiling when deriving the
/// chain duration.
pub const DEFAULT_TIME_MARGIN_SECS: u64 = 30;

/// Default byte cap applied to each error log when relayed in a failure
/// notification.
pub const DEFAULT_ERROR_CAP_BYTES: usize = 300_000;

/// Default minimum age before `purge` may remove a job's files.
pub const DEFAULT_PURGE_MIN_AGE_DAYS: u64 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no data directory configured and no platform default available")]
    NoDataDir,
}

/// Resolved, immutable configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding every coordination file keyed by token
    pub data_dir: PathBuf,
    /// Directory holding rendered outputs
    pub output_dir: PathBuf,
    /// Web base under which the output directory is served, if any
    pub output_url_base: Option<String>,
    /// Fixed per-worker time budget; `None` derives one from the ceiling
    pub chain_duration_secs: Option<u64>,
    /// Host execution-time kill limit, if known
    pub time_ceiling_secs: Option<u64>,
    /// Safety margin subtracted from the ceiling when deriving the budget
    pub time_margin_secs: u64,
    /// Byte cap for the user error log in failure notifications
    pub user_error_cap_bytes: usize,
    /// Byte cap for the admin error log in failure notifications
    pub admin_error_cap_bytes: usize,
    /// Minimum family age before `purge` removes it
    pub purge_min_age_days: u64,
    /// Directory failure notifications are spooled into, if set
    pub outbox_dir: Option<PathBuf>,
    /// Also raise a desktop notification on failure
    pub desktop_notify: bool,
    /// Worker binary override for successor spawns
    pub worker_bin: Option<PathBuf>,
    /// User-Agent override for scrape drivers
    pub user_agent: Option<String>,
    /// File this configuration was loaded from, propagated to successors
    pub source_path: Option<PathBuf>,
}

/// On-disk shape of the config file. Every field optional; unknown keys
/// rejected so typos fail loudly instead of silently using a default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    output_url_base: Option<String>,
    chain_duration_secs: Option<u64>,
    time_ceiling_secs: Option<u64>,
    time_margin_secs: Option<u64>,
    user_error_cap_bytes: Option<usize>,
    admin_error_cap_bytes: Option<usize>,
    purge_min_age_days: Option<u64>,
    outbox_dir: Option<PathBuf>,
    desktop_notify: Option<bool>,
    worker_bin: Option<PathBuf>,
    user_agent: Option<String>,
}

impl Config {
    /// Load configuration from `explicit` (or `BATON_CONFIG`), apply
    /// environment overrides, and fill remaining fields with defaults.
    ///
    /// A named config file that cannot be read or parsed is an error, not a
    /// silent fallback.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let source = explicit.map(Path::to_path_buf).or_else(env::config_path);
        let file = match &source {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
                toml::from_str::<ConfigFile>(&text)
                    .map_err(|source| ConfigError::Parse { path: path.clone(), source })?
            }
            None => ConfigFile::default(),
        };
        Self::resolve(file, source)
    }

    fn resolve(file: ConfigFile, source_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = env::data_dir()
            .or(file.data_dir)
            .or_else(|| dirs::data_local_dir().map(|d| d.join("baton").join("data")))
            .ok_or(ConfigError::NoDataDir)?;
        let output_dir = env::output_dir()
            .or(file.output_dir)
            .unwrap_or_else(|| data_dir.join("output"));

        Ok(Self {
            data_dir,
            output_dir,
            output_url_base: file.output_url_base,
            chain_duration_secs: env::chain_duration_secs().or(file.chain_duration_secs),
            time_ceiling_secs: env::time_ceiling_secs().or(file.time_ceiling_secs),
            time_margin_secs: file.time_margin_secs.unwrap_or(DEFAULT_TIME_MARGIN_SECS),
            user_error_cap_bytes: file.user_error_cap_bytes.unwrap_or(DEFAULT_ERROR_CAP_BYTES),
            admin_error_cap_bytes: file.admin_error_cap_bytes.unwrap_or(DEFAULT_ERROR_CAP_BYTES),
            purge_min_age_days: file.purge_min_age_days.unwrap_or(DEFAULT_PURGE_MIN_AGE_DAYS),
            outbox_dir: file.outbox_dir,
            desktop_notify: file.desktop_notify.unwrap_or(false),
            worker_bin: env::worker_bin().or(file.worker_bin),
            user_agent: file.user_agent,
            source_path,
        })
    }
}

crate::builder! {
    pub struct ConfigBuilder => Config {
        into {
            data_dir: PathBuf = "/tmp/baton/data",
            output_dir: PathBuf = "/tmp/baton/output",
        }
        set {
            chain_duration_secs: Option<u64> = None,
            time_ceiling_secs: Option<u64> = None,
            time_margin_secs: u64 = DEFAULT_TIME_MARGIN_SECS,
            user_error_cap_bytes: usize = DEFAULT_ERROR_CAP_BYTES,
            admin_error_cap_bytes: usize = DEFAULT_ERROR_CAP_BYTES,
            purge_min_age_days: u64 = DEFAULT_PURGE_MIN_AGE_DAYS,
            desktop_notify: bool = false,
        }
        option {
            output_url_base: String = None,
            outbox_dir: PathBuf = None,
            worker_bin: PathBuf = None,
            user_agent: String = None,
            source_path: PathBuf = None,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
