// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scrape settings: written once at submission, read-only for every worker
//! in the chain.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Scrape configuration for one job.
///
/// `forum` selects the scrape driver; `driver` carries driver-specific
/// knobs the core never interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeSettings {
    pub forum: String,
    pub base_url: String,
    /// Forum user whose posts are extracted, when the driver scopes by user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_password: Option<String>,
    /// Skip posts older than this date, driver-interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_from_date: Option<String>,
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub driver: toml::Table,
}

impl ScrapeSettings {
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }
}

/// Digest of the settings text, carried in every checkpoint so a resuming
/// worker can detect mid-chain drift of the read-only settings file.
pub fn settings_digest(contents: &str) -> String {
    format!("{:x}", Sha256::digest(contents.as_bytes()))
}

crate::builder! {
    pub struct ScrapeSettingsBuilder => ScrapeSettings {
        into {
            forum: String = "drill",
            base_url: String = "https://forum.example.org",
        }
        set {
            driver: toml::Table = toml::Table::new(),
        }
        option {
            extract_user: String = None,
            login_user: String = None,
            login_password: String = None,
            start_from_date: String = None,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
