// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker loop: one process's turn at a job.
//!
//! Each pass over the scrape loop performs the three checks in priority
//! order: cancellation, then fatal error, then time budget. Whichever fires
//! first decides how this process ends; if none fire, the loop continues
//! until the driver reports completion.

use crate::chain::{resolve_chain_duration, ChainBudget, ChainState};
use crate::failure;
use crate::launch::{LaunchRequest, Launcher};
use baton_adapters::notify::Notifier;
use baton_adapters::scrape::{ScrapeContext, ScrapeError, Scraper, StepOutcome};
use baton_core::checkpoint::{self, Checkpoint, CheckpointError};
use baton_core::clock::Clock;
use baton_core::config::Config;
use baton_core::files::{FileKind, JobFiles, JobKey};
use baton_core::settings::{settings_digest, ScrapeSettings};
use baton_core::status;
use baton_core::store::{JobStore, StoreError};
use baton_core::cancel;
use std::path::Path;
use thiserror::Error;

/// Builds the scrape driver for a job; injected so tests can script steps.
pub type DriverFactory<'a> =
    dyn Fn(&ScrapeSettings, ScrapeContext) -> Result<Box<dyn Scraper>, ScrapeError> + 'a;

/// Everything a worker needs besides the job itself.
pub struct WorkerEnv<'a> {
    pub config: &'a Config,
    pub store: &'a dyn JobStore,
    pub files: &'a JobFiles,
    pub launcher: &'a dyn Launcher,
    pub notifiers: &'a [&'a dyn Notifier],
    /// Explicit output destination, overriding the derived path
    pub output_override: Option<&'a Path>,
}

/// How this worker process ended. `Chained` means the job itself is still
/// running, under a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    Done,
    Chained,
    Cancelled,
    Failed,
}

/// Returned only when even recording a failure was impossible.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to record job failure: {0}")]
    Recording(#[from] StoreError),
}

/// A job-level failure on its way to the error logs.
struct JobFailure {
    user: String,
    admin: String,
}

impl JobFailure {
    fn new(user: impl Into<String>, admin: impl Into<String>) -> Self {
        Self { user: user.into(), admin: admin.into() }
    }
}

impl From<ScrapeError> for JobFailure {
    fn from(e: ScrapeError) -> Self {
        Self { user: e.to_string(), admin: format!("scrape driver error: {e}") }
    }
}

impl From<StoreError> for JobFailure {
    fn from(e: StoreError) -> Self {
        Self::new("an internal error occurred while accessing job files", e.to_string())
    }
}

impl From<CheckpointError> for JobFailure {
    fn from(e: CheckpointError) -> Self {
        Self::new("the resume checkpoint could not be read or written", e.to_string())
    }
}

/// Run one worker process to its end.
///
/// Job-level failures are recorded through the failure path and come back
/// as `Ok(WorkerOutcome::Failed)`; the `Err` arm is reserved for failures
/// of the recording itself.
pub fn run_worker<C: Clock>(
    env: &WorkerEnv<'_>,
    clock: &C,
    key: &JobKey,
    chained: bool,
    factory: &DriverFactory<'_>,
) -> Result<WorkerOutcome, WorkerError> {
    match execute(env, clock, key, chained, factory) {
        Ok(outcome) => Ok(outcome),
        Err(fail) => {
            tracing::error!(%key, error = %fail.admin, "job failed");
            match key.token() {
                Some(token) => {
                    status::mark_failed(env.store, token, &fail.user)?;
                    failure::record_failure(
                        env.store,
                        env.config,
                        token,
                        &fail.user,
                        &fail.admin,
                        env.notifiers,
                    )?;
                }
                None => eprintln!("ERROR: {}", fail.user),
            }
            Ok(WorkerOutcome::Failed)
        }
    }
}

fn execute<C: Clock>(
    env: &WorkerEnv<'_>,
    clock: &C,
    key: &JobKey,
    chained: bool,
    factory: &DriverFactory<'_>,
) -> Result<WorkerOutcome, JobFailure> {
    let mut state = ChainState::Starting;
    tracing::info!(%key, chained, state = %state, "worker starting");

    let settings_text = env
        .store
        .read(key, FileKind::Settings)?
        .ok_or_else(|| JobFailure::new("no settings found for this job", format!("settings file missing for {key}")))?;
    let settings = ScrapeSettings::from_toml(&settings_text).map_err(|e| {
        JobFailure::new(format!("the settings could not be parsed: {e}"), format!("settings parse failure for {key}: {e}"))
    })?;
    let digest = settings_digest(&settings_text);

    let duration = resolve_chain_duration(env.config);
    let budget = ChainBudget::start(clock, duration);

    let ctx = ScrapeContext::new(env.config, env.files.path(key, FileKind::Cookies));
    let mut scraper = factory(&settings, ctx)?;

    let mut hop = 1u32;
    if chained {
        let cp = checkpoint::load(env.store, key)?.ok_or_else(|| {
            JobFailure::new(
                "the job could not be resumed: its checkpoint is missing",
                format!("chained start without checkpoint for {key}"),
            )
        })?;
        if cp.settings_digest != digest {
            return Err(JobFailure::new(
                "the settings file changed while the job was running; aborting",
                format!(
                    "settings drift for {key}: checkpoint digest {} vs current {}",
                    cp.settings_digest, digest
                ),
            ));
        }
        scraper.resume(&cp.progress)?;
        hop = cp.hop;
        narrate(env, key, &format!("Resuming scrape (worker {hop})."))?;
    } else {
        narrate(env, key, "Scrape started.")?;
    }
    state = ChainState::Running;
    tracing::debug!(%key, hop, budget_secs = duration.as_secs(), state = %state, "worker running");

    loop {
        if let Some(token) = key.token() {
            if cancel::observed(env.store, token) {
                state = ChainState::Cancelled;
                tracing::info!(%token, state = %state, "cancellation observed");
                status::mark_cancelled(env.store, token)?;
                return Ok(WorkerOutcome::Cancelled);
            }
        }

        match scraper.step() {
            Err(e) => return Err(e.into()),
            Ok(StepOutcome::Complete { output }) => {
                write_output(env, key, &output)?;
                state = ChainState::Done;
                match key.token() {
                    Some(token) => {
                        let location = env
                            .files
                            .output_url(token)
                            .unwrap_or_else(|| output_path(env, key).display().to_string());
                        narrate(env, key, &format!("Scrape complete. Output at {location}"))?;
                        status::mark_done(env.store, token)?;
                    }
                    None => {
                        let path = output_path(env, key);
                        narrate(env, key, &format!("Scrape complete. Output written to {}", path.display()))?;
                    }
                }
                tracing::info!(%key, hop, state = %state, "job finished");
                return Ok(WorkerOutcome::Done);
            }
            Ok(StepOutcome::Advanced { note }) => {
                narrate(env, key, &note)?;
            }
        }

        if budget.exhausted(clock) {
            state = ChainState::Chaining;
            // Last status append of this worker; the successor's first
            // append must come after it.
            narrate(env, key, "Continuing in a fresh worker.")?;
            let cp = Checkpoint::new(hop + 1, digest.clone(), scraper.progress());
            checkpoint::save(env.store, key, &cp)?;
            let request = successor_request(env, key);
            if let Err(e) = env.launcher.launch(&request) {
                // This worker is about to exit and cannot retry; the trail
                // has to survive in the admin log. Tokenless runs own no
                // error files, so their trail goes to stderr.
                tracing::error!(%key, error = %e, "successor launch failed");
                let line = failure::log_line(&format!("could not launch successor worker: {e}"));
                match key.token() {
                    Some(_) => env.store.append(key, FileKind::AdminErrors, &line)?,
                    None => eprint!("{line}"),
                }
            }
            tracing::info!(%key, next_hop = hop + 1, state = %state, "handing off");
            return Ok(WorkerOutcome::Chained);
        }
    }
}

/// Progress narration: the status file for token jobs, stdout for
/// settings-keyed commandline runs.
fn narrate(env: &WorkerEnv<'_>, key: &JobKey, line: &str) -> Result<(), StoreError> {
    match key.token() {
        Some(token) => status::append_line(env.store, token, line),
        None => {
            println!("{line}");
            Ok(())
        }
    }
}

fn output_path(env: &WorkerEnv<'_>, key: &JobKey) -> std::path::PathBuf {
    match env.output_override {
        Some(path) => path.to_path_buf(),
        None => env.files.path(key, FileKind::Output),
    }
}

fn write_output(env: &WorkerEnv<'_>, key: &JobKey, output: &str) -> Result<(), JobFailure> {
    match env.output_override {
        Some(path) => std::fs::write(path, output).map_err(|e| {
            JobFailure::new(
                format!("the output could not be written to {}", path.display()),
                format!("output write failure for {key}: {e}"),
            )
        }),
        None => Ok(env.store.write(key, FileKind::Output, output)?),
    }
}

/// The launch request that continues this job in a fresh process.
fn successor_request(env: &WorkerEnv<'_>, key: &JobKey) -> LaunchRequest {
    LaunchRequest {
        token: key.token().cloned(),
        settings_path: match key {
            JobKey::Token(_) => None,
            JobKey::Settings(_) => Some(env.files.path(key, FileKind::Settings)),
        },
        output_path: env.output_override.map(Path::to_path_buf),
        chained: true,
        config_path: env.config.source_path.clone(),
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
