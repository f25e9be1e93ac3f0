// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure recording and notification.
//!
//! A failed job leaves two trails: the user error log (display-safe, shown
//! by the viewer) and the admin error log (full detail). Notification
//! relays both, each truncated to its own byte cap: the caps are hard
//! ceilings on message size, cutting mid-line if they must.

use baton_adapters::notify::{FailureReport, Notifier};
use baton_core::config::Config;
use baton_core::files::{FileKind, JobKey};
use baton_core::store::{JobStore, StoreError};
use baton_core::token::Token;

/// A timestamped error-log line.
pub(crate) fn log_line(message: &str) -> String {
    format!("[{}] {message}\n", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
}

/// Cut `text` down to at most `cap` bytes, backing up to a character
/// boundary when the cap lands inside one.
fn truncate_to_cap(text: &str, cap: usize) -> &str {
    if text.len() <= cap {
        return text;
    }
    let mut end = cap;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Append the failure to both error logs, then relay the logs' full
/// accumulated content (capped) through every notifier.
///
/// Notification is best-effort: a notifier that cannot send is logged and
/// skipped, because the worker is exiting and has nowhere to escalate to.
pub fn record_failure(
    store: &dyn JobStore,
    config: &Config,
    token: &Token,
    user_message: &str,
    admin_message: &str,
    notifiers: &[&dyn Notifier],
) -> Result<(), StoreError> {
    let key = JobKey::Token(token.clone());
    store.append(&key, FileKind::UserErrors, &log_line(user_message))?;
    store.append(&key, FileKind::AdminErrors, &log_line(admin_message))?;

    let user_log = store.read(&key, FileKind::UserErrors)?.unwrap_or_default();
    let admin_log = store.read(&key, FileKind::AdminErrors)?.unwrap_or_default();
    let report = FailureReport {
        token: token.clone(),
        subject: format!("baton scrape failure: {token}"),
        user_log: truncate_to_cap(&user_log, config.user_error_cap_bytes).to_string(),
        admin_log: truncate_to_cap(&admin_log, config.admin_error_cap_bytes).to_string(),
    };
    for notifier in notifiers {
        if let Err(e) = notifier.notify(&report) {
            tracing::warn!(%token, error = %e, "failure notification could not be sent");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
