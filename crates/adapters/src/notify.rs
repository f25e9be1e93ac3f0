// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use baton_core::token::Token;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("failed to write outbox file {path}: {source}")]
    Outbox {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One failed job, ready to relay. Both logs arrive already capped.
#[derive(Debug, Clone)]
pub struct FailureReport {
    pub token: Token,
    pub subject: String,
    pub user_log: String,
    pub admin_log: String,
}

/// Adapter for relaying failure reports to the operator
pub trait Notifier: Send + Sync {
    fn notify(&self, report: &FailureReport) -> Result<(), NotifyError>;
}

/// Spools each report into its own file under the outbox directory, ready
/// for an out-of-band mailer to pick up.
#[derive(Debug, Clone)]
pub struct SpoolNotifier {
    outbox_dir: PathBuf,
}

impl SpoolNotifier {
    pub fn new(outbox_dir: PathBuf) -> Self {
        Self { outbox_dir }
    }
}

impl Notifier for SpoolNotifier {
    fn notify(&self, report: &FailureReport) -> Result<(), NotifyError> {
        let name = format!(
            "{}-{}.txt",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%3fZ"),
            report.token
        );
        let path = self.outbox_dir.join(name);
        let body = format!(
            "Subject: {}\n\n-- user log --\n{}\n\n-- admin log --\n{}\n",
            report.subject, report.user_log, report.admin_log
        );
        std::fs::create_dir_all(&self.outbox_dir)
            .and_then(|()| std::fs::write(&path, body))
            .map_err(|source| NotifyError::Outbox { path: path.clone(), source })?;
        tracing::info!(token = %report.token, path = %path.display(), "failure report spooled");
        Ok(())
    }
}

/// Desktop notification adapter using notify-rust.
///
/// On macOS, `notify-rust` uses `mac-notification-sys` (Cocoa bindings) to
/// deliver via the Notification Center. The first notification triggers
/// `ensure_application_set()` which runs an AppleScript to look up a bundle
/// identifier; in a detached worker without Automation permissions that
/// AppleScript blocks forever. We pre-set the bundle identifier at
/// construction time to bypass the lookup entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            // Pre-set the application bundle identifier so mac-notification-sys
            // skips its NSAppleScript lookup (which blocks forever in detached
            // processes that lack Automation permissions).
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, report: &FailureReport) -> Result<(), NotifyError> {
        // A toast cannot carry the full logs; show the first user-facing line.
        let detail = report.user_log.lines().next().unwrap_or("(no detail)");
        tracing::info!(token = %report.token, "sending desktop notification");
        notify_rust::Notification::new()
            .summary(&report.subject)
            .body(detail)
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{FailureReport, Notifier, NotifyError};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeNotifierState {
        reports: Vec<FailureReport>,
        reject: bool,
    }

    /// Fake notifier for testing
    #[derive(Clone)]
    pub struct FakeNotifier {
        inner: Arc<Mutex<FakeNotifierState>>,
    }

    impl Default for FakeNotifier {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeNotifierState {
                    reports: Vec::new(),
                    reject: false,
                })),
            }
        }
    }

    impl FakeNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// A notifier whose sends always fail
        pub fn rejecting() -> Self {
            let fake = Self::default();
            fake.inner.lock().reject = true;
            fake
        }

        /// Get all recorded reports
        pub fn reports(&self) -> Vec<FailureReport> {
            self.inner.lock().reports.clone()
        }
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, report: &FailureReport) -> Result<(), NotifyError> {
            let mut state = self.inner.lock();
            if state.reject {
                return Err(NotifyError::SendFailed("rejecting fake".to_string()));
            }
            state.reports.push(report.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifier;

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
