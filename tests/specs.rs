// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs driving the real `baton` binary.
//!
//! Every spec runs against its own temporary data/output/outbox layout and
//! the `drill` driver, whose paced pages make chain handoff and cancellation
//! timing deterministic enough to assert on.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/job/lifecycle.rs"]
mod job_lifecycle;

#[path = "specs/job/chaining.rs"]
mod job_chaining;

#[path = "specs/job/cancel.rs"]
mod job_cancel;

#[path = "specs/job/failure.rs"]
mod job_failure;

#[path = "specs/cli/validation.rs"]
mod cli_validation;
