// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detached worker launching.
//!
//! Launch-and-relinquish: the launcher starts a worker process and returns
//! without a handle to await. It is only ever invoked by the submitting
//! process (first worker) or by the active worker just before it exits
//! (successor), so at most one live worker exists per job at any instant by
//! protocol, not by locking.

use baton_core::config::Config;
use baton_core::files::{FileKind, JobFiles, JobKey};
use baton_core::token::Token;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Errors from launch operations
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no worker binary available: {0}")]
    NoWorkerBinary(String),
    #[error("failed to open admin error log {path}: {source}")]
    Redirect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to spawn worker: {0}")]
    SpawnFailed(#[source] std::io::Error),
}

/// One worker invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    pub token: Option<Token>,
    pub settings_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    /// Successor continuing a chain, as opposed to worker #1
    pub chained: bool,
    pub config_path: Option<PathBuf>,
}

/// Adapter for starting workers
pub trait Launcher: Send + Sync {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError>;
}

/// Spawns a detached `run` invocation of the worker binary.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    worker_bin: PathBuf,
    files: JobFiles,
}

impl ProcessLauncher {
    /// The configured worker binary wins; otherwise the current executable
    /// re-invokes itself.
    pub fn from_config(config: &Config) -> Result<Self, LaunchError> {
        let worker_bin = match &config.worker_bin {
            Some(bin) => bin.clone(),
            None => std::env::current_exe()
                .map_err(|e| LaunchError::NoWorkerBinary(e.to_string()))?,
        };
        Ok(Self { worker_bin, files: JobFiles::new(config) })
    }
}

fn worker_args(request: &LaunchRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["run".into()];
    if let Some(token) = &request.token {
        args.push("--token".into());
        args.push(token.as_str().into());
    }
    if let Some(path) = &request.settings_path {
        args.push("--settings".into());
        args.push(path.into());
    }
    if let Some(path) = &request.output_path {
        args.push("--output".into());
        args.push(path.into());
    }
    if request.chained {
        args.push("--chained".into());
    }
    if let Some(path) = &request.config_path {
        args.push("--config".into());
        args.push(path.into());
    }
    args
}

impl Launcher for ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        let mut cmd = Command::new(&self.worker_bin);
        cmd.args(worker_args(request));
        cmd.stdin(Stdio::null());
        match &request.token {
            Some(token) => {
                // Anything the child prints before its own logging stands up
                // (panics, bad flags) still lands in the job's error trail.
                let path =
                    self.files.path(&JobKey::Token(token.clone()), FileKind::AdminErrors);
                let log = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| LaunchError::Redirect { path: path.clone(), source })?;
                let log_err = log
                    .try_clone()
                    .map_err(|source| LaunchError::Redirect { path, source })?;
                cmd.stdout(Stdio::from(log));
                cmd.stderr(Stdio::from(log_err));
            }
            None => {
                cmd.stdout(Stdio::null());
                cmd.stderr(Stdio::null());
            }
        }
        // New process group: the worker must survive its parent's exit and
        // any signal aimed at the parent's terminal session.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        let child = cmd.spawn().map_err(LaunchError::SpawnFailed)?;
        tracing::info!(
            pid = child.id(),
            token = request.token.as_ref().map_or("-", Token::as_str),
            chained = request.chained,
            "worker launched"
        );
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{LaunchError, LaunchRequest, Launcher};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Instant;

    struct FakeLauncherState {
        launches: Vec<(LaunchRequest, Instant)>,
        reject: Option<String>,
    }

    /// Fake launcher for testing.
    ///
    /// Records each request with its arrival instant so tests can assert
    /// spawn ordering against other recorded events.
    #[derive(Clone)]
    pub struct FakeLauncher {
        inner: Arc<Mutex<FakeLauncherState>>,
    }

    impl Default for FakeLauncher {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeLauncherState {
                    launches: Vec::new(),
                    reject: None,
                })),
            }
        }
    }

    impl FakeLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        /// A launcher whose spawns always fail
        pub fn rejecting(reason: &str) -> Self {
            let fake = Self::default();
            fake.inner.lock().reject = Some(reason.to_string());
            fake
        }

        /// Get all recorded requests, in launch order
        pub fn requests(&self) -> Vec<LaunchRequest> {
            self.inner.lock().launches.iter().map(|(request, _)| request.clone()).collect()
        }

        /// Get all recorded requests with their arrival instants
        pub fn launches(&self) -> Vec<(LaunchRequest, Instant)> {
            self.inner.lock().launches.clone()
        }
    }

    impl Launcher for FakeLauncher {
        fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
            let mut state = self.inner.lock();
            if let Some(reason) = &state.reject {
                return Err(LaunchError::SpawnFailed(std::io::Error::other(reason.clone())));
            }
            state.launches.push((request.clone(), Instant::now()));
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLauncher;

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
