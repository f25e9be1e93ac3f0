// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resume checkpoint handed from a worker to its successor.
//!
//! The checkpoint is overwritten wholesale on every handoff; there is at
//! most one valid checkpoint per job, and it always describes the frontier
//! the next worker should resume from. The `progress` payload is opaque to
//! the core and owned entirely by the scrape driver.

use crate::files::{FileKind, JobKey};
use crate::store::{JobStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid checkpoint encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Envelope persisted to the checkpoint file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// 1-based position of the worker that should resume from this
    pub hop: u32,
    /// Digest of the settings text this chain was started with
    pub settings_digest: String,
    pub written_at: DateTime<Utc>,
    /// Driver-owned resume payload
    pub progress: serde_json::Value,
}

impl Checkpoint {
    pub fn new(hop: u32, settings_digest: impl Into<String>, progress: serde_json::Value) -> Self {
        Self { hop, settings_digest: settings_digest.into(), written_at: Utc::now(), progress }
    }
}

/// Persist the checkpoint, replacing any previous one.
pub fn save(
    store: &dyn JobStore,
    key: &JobKey,
    checkpoint: &Checkpoint,
) -> Result<(), CheckpointError> {
    let encoded = serde_json::to_string(checkpoint)?;
    store.write(key, FileKind::Checkpoint, &encoded)?;
    tracing::debug!(%key, hop = checkpoint.hop, "checkpoint written");
    Ok(())
}

/// Load the checkpoint, if one has been written.
pub fn load(store: &dyn JobStore, key: &JobKey) -> Result<Option<Checkpoint>, CheckpointError> {
    match store.read(key, FileKind::Checkpoint)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
