// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job submission: the step that turns a settings text into a running chain.

use crate::launch::{LaunchError, LaunchRequest, Launcher};
use baton_core::config::Config;
use baton_core::files::{FileKind, JobKey};
use baton_core::settings::{ScrapeSettings, SettingsError};
use baton_core::store::{JobStore, StoreError};
use baton_core::token::{Token, TokenError};
use thiserror::Error;

/// Errors from job submission
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("settings are invalid: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Validate the settings, allocate a token, persist the settings under it,
/// and launch worker #1 detached. Returns the token the submitter polls
/// with.
///
/// Settings are validated before any file exists, so an invalid submission
/// leaves no trace. A launch failure after the settings were written does
/// leave them behind; the token comes back inside the error trail and the
/// family can be deleted like any other job's.
pub fn submit(
    store: &dyn JobStore,
    launcher: &dyn Launcher,
    config: &Config,
    settings_text: &str,
) -> Result<Token, SubmitError> {
    ScrapeSettings::from_toml(settings_text)?;
    let token = Token::allocate(store)?;
    let key = JobKey::Token(token.clone());
    store.write(&key, FileKind::Settings, settings_text)?;
    let request = LaunchRequest {
        token: Some(token.clone()),
        settings_path: None,
        output_path: None,
        chained: false,
        config_path: config.source_path.clone(),
    };
    launcher.launch(&request)?;
    tracing::info!(%token, "job submitted");
    Ok(token)
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
