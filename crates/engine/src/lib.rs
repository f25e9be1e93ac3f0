// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! baton-engine: the chain scheduler and its collaborators.
//!
//! One worker process at a time owns a job. This crate decides when that
//! worker must checkpoint and hand off to a fresh process, launches the
//! successor, and records failures when the chain has to end early.

pub mod chain;
pub mod failure;
pub mod launch;
pub mod submit;
pub mod worker;

pub use chain::{resolve_chain_duration, ChainBudget, ChainState, FALLBACK_CHAIN_DURATION_SECS};
#[cfg(any(test, feature = "test-support"))]
pub use launch::FakeLauncher;
pub use launch::{LaunchError, LaunchRequest, Launcher, ProcessLauncher};
pub use submit::{submit, SubmitError};
pub use worker::{run_worker, DriverFactory, WorkerEnv, WorkerError, WorkerOutcome};
