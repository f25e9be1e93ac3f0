// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scrape driver boundary.
//!
//! A driver owns everything forum-specific: fetching, parsing, session
//! cookies, and the shape of its resume payload. The engine only sees
//! checkpoint-granular [`Scraper::step`] calls, so cancellation latency and
//! chain handoff are both bounded by one step regardless of driver.
//!
//! Real forum drivers (live HTTP against phpBB and friends) plug in through
//! the same trait; the workspace ships `drill`, a deterministic paced
//! driver used for rehearsal and the end-to-end suite.

use baton_core::config::Config;
use baton_core::settings::ScrapeSettings;
use std::path::PathBuf;
use thiserror::Error;

mod drill;
pub use drill::DrillScraper;

#[cfg(any(test, feature = "test-support"))]
mod scripted;
#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedScraper;

/// Errors from scrape drivers. All fatal: per-request retries happen inside
/// a driver and never surface here.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("unknown forum driver {0:?}")]
    UnknownDriver(String),
    #[error("invalid driver settings: {0}")]
    InvalidSettings(String),
    #[error("page {page} could not be retrieved: {reason}")]
    PageFailed { page: u32, reason: String },
    #[error("resume payload not recognized by the driver: {0}")]
    BadResume(String),
    #[error("driver failure: {0}")]
    Driver(String),
}

/// Result of one checkpoint-granular unit of scrape work.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// One unit done; `note` is the progress narration for the status log
    Advanced { note: String },
    /// The scrape finished; `output` is the rendered result document
    Complete { output: String },
}

/// Ambient state handed to a driver at construction.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    pub user_agent: String,
    /// Session cookie jar location; the driver owns reads and writes
    pub cookies_path: PathBuf,
}

impl ScrapeContext {
    pub fn new(config: &Config, cookies_path: PathBuf) -> Self {
        Self {
            user_agent: config.user_agent.clone().unwrap_or_else(default_user_agent),
            cookies_path,
        }
    }
}

/// User-Agent presented to forums when no override is configured.
pub fn default_user_agent() -> String {
    format!("baton/{} (forum user post scraper)", env!("CARGO_PKG_VERSION"))
}

/// One forum scrape in progress.
///
/// A `step` is the unit of checkpoint granularity: after any `Ok` step the
/// driver's [`Scraper::progress`] payload must be enough for a fresh driver
/// in a successor process to [`Scraper::resume`] and carry on.
pub trait Scraper: Send {
    /// Restore driver state from a predecessor's checkpoint payload.
    fn resume(&mut self, progress: &serde_json::Value) -> Result<(), ScrapeError>;
    /// Perform one unit of work.
    fn step(&mut self) -> Result<StepOutcome, ScrapeError>;
    /// Snapshot the resume payload for the next checkpoint.
    fn progress(&self) -> serde_json::Value;
}

/// Construct the driver named by the settings.
pub fn driver_for(
    settings: &ScrapeSettings,
    ctx: ScrapeContext,
) -> Result<Box<dyn Scraper>, ScrapeError> {
    match settings.forum.as_str() {
        drill::DRIVER_NAME => Ok(Box::new(DrillScraper::from_settings(settings, ctx)?)),
        other => Err(ScrapeError::UnknownDriver(other.to_string())),
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
