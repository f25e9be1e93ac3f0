// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only status protocol.
//!
//! The status file is a plain text log: the active worker appends progress
//! lines, each terminated by a newline, and ends the job by appending one
//! bare terminal marker with no trailing newline. Classification is a raw
//! suffix test over the file's final bytes, so the newline after every
//! progress line is what keeps narration from ever reading as terminal.

use crate::files::{FileKind, JobKey};
use crate::store::{JobStore, StoreError};
use crate::token::Token;

/// Terminal marker: the scrape ran to completion.
pub const DONE_MARKER: &str = "DONE";
/// Terminal marker: the job failed and the worker exited.
pub const EXITING_MARKER: &str = "EXITING";
/// Terminal marker: cancellation was observed.
pub const CANCELLED_MARKER: &str = "CANCELLED";

/// Classification of a status text's tail. At most one flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFlags {
    pub done: bool,
    pub cancelled: bool,
    pub failed: bool,
}

impl StatusFlags {
    pub fn is_terminal(self) -> bool {
        self.done || self.cancelled || self.failed
    }

    pub fn state_name(self) -> &'static str {
        if self.done {
            "done"
        } else if self.cancelled {
            "cancelled"
        } else if self.failed {
            "failed"
        } else {
            "running"
        }
    }
}

/// Classify the tail of a status text.
///
/// Raw suffix semantics: the markers are mutually exclusive as suffixes, so
/// at most one flag can come back set.
pub fn classify(text: &str) -> StatusFlags {
    StatusFlags {
        done: text.ends_with(DONE_MARKER),
        cancelled: text.ends_with(CANCELLED_MARKER),
        failed: text.ends_with(EXITING_MARKER),
    }
}

/// Append one progress line, newline-terminated.
pub fn append_line(store: &dyn JobStore, token: &Token, line: &str) -> Result<(), StoreError> {
    tracing::debug!(%token, line, "status");
    store.append(&JobKey::Token(token.clone()), FileKind::Status, &format!("{line}\n"))
}

/// Read the full status text, if any worker has written one yet.
pub fn read(store: &dyn JobStore, token: &Token) -> Result<Option<String>, StoreError> {
    store.read(&JobKey::Token(token.clone()), FileKind::Status)
}

/// Classify a token's current status file (absent file reads as running).
pub fn classify_for(store: &dyn JobStore, token: &Token) -> Result<StatusFlags, StoreError> {
    Ok(classify(read(store, token)?.as_deref().unwrap_or("")))
}

/// End the status log with the completion marker.
pub fn mark_done(store: &dyn JobStore, token: &Token) -> Result<(), StoreError> {
    store.append(&JobKey::Token(token.clone()), FileKind::Status, DONE_MARKER)
}

/// End the status log with the cancellation marker.
pub fn mark_cancelled(store: &dyn JobStore, token: &Token) -> Result<(), StoreError> {
    store.append(&JobKey::Token(token.clone()), FileKind::Status, CANCELLED_MARKER)
}

/// End the status log with a failure narration line and the exit marker.
pub fn mark_failed(store: &dyn JobStore, token: &Token, narration: &str) -> Result<(), StoreError> {
    append_line(store, token, narration)?;
    store.append(&JobKey::Token(token.clone()), FileKind::Status, EXITING_MARKER)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
