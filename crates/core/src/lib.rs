// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! baton-core: token identity, job file protocol, and configuration for the
//! baton scrape-job orchestrator.

pub mod macros;

pub mod cancel;
pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod env;
pub mod files;
pub mod settings;
pub mod status;
pub mod store;
pub mod token;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use checkpoint::{Checkpoint, CheckpointError};
pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use config::{Config, ConfigError};
pub use files::{FileKind, JobFiles, JobKey};
pub use settings::{settings_digest, ScrapeSettings, SettingsError};
pub use status::{StatusFlags, CANCELLED_MARKER, DONE_MARKER, EXITING_MARKER};
pub use store::{FsJobStore, JobStore, StoreError};
#[cfg(any(test, feature = "test-support"))]
pub use store::MemJobStore;
pub use token::{Token, TokenError, TOKEN_LEN};
