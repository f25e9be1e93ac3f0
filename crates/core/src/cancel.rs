// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellation gate.
//!
//! Cancellation is a sentinel file: any process may create it, the active
//! worker only ever probes for it. Observation must not consume the signal,
//! otherwise a successor spawned in the same instant would miss it. The
//! sentinel is cleaned up with the rest of the family by delete or purge.

use crate::files::{FileKind, JobKey};
use crate::store::{JobStore, StoreError};
use crate::token::Token;

/// Request cancellation of a token's job. Idempotent.
pub fn request(store: &dyn JobStore, token: &Token) -> Result<(), StoreError> {
    tracing::info!(%token, "cancellation requested");
    store.write(&JobKey::Token(token.clone()), FileKind::Cancel, "")
}

/// Check whether cancellation has been requested. Non-destructive.
pub fn observed(store: &dyn JobStore, token: &Token) -> bool {
    store.exists(&JobKey::Token(token.clone()), FileKind::Cancel)
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
