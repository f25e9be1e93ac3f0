// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! baton-adapters: boundaries to the scrape drivers and the notification
//! targets, with fakes for the rest of the workspace to test against.

pub mod notify;
pub mod scrape;

pub use notify::{FailureReport, Notifier, NotifyError};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifier;
pub use scrape::{driver_for, ScrapeContext, ScrapeError, Scraper, StepOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use scrape::ScriptedScraper;
