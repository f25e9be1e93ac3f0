// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `baton run` - worker entry point.
//!
//! Invoked by the launcher: once by `submit` for worker #1, then by each
//! active worker for its successor (with `--chained`). Also usable by hand
//! with `--settings` for tokenless commandline scrapes.

use super::open_store;
use anyhow::{anyhow, Result};
use baton_adapters::notify::{DesktopNotifier, Notifier, SpoolNotifier};
use baton_adapters::scrape::driver_for;
use baton_core::clock::SystemClock;
use baton_core::config::Config;
use baton_core::files::{JobFiles, JobKey};
use baton_core::token::Token;
use baton_engine::launch::ProcessLauncher;
use baton_engine::worker::{run_worker, WorkerEnv, WorkerOutcome};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Job token; the job's files are derived from it
    #[arg(short = 't', long)]
    pub token: Option<Token>,

    /// Settings file for a tokenless commandline run
    #[arg(short = 'i', long, value_name = "FILE", conflicts_with = "token")]
    pub settings: Option<PathBuf>,

    /// Explicit output destination, overriding the derived path
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Continue a chain from the existing checkpoint
    #[arg(short = 'c', long)]
    pub chained: bool,
}

pub fn handle(args: RunArgs, config: &Config) -> Result<()> {
    let key = match (args.token, args.settings) {
        (Some(token), _) => JobKey::Token(token),
        (None, Some(path)) => JobKey::Settings(path),
        (None, None) => return Err(anyhow!("either --token or --settings is required")),
    };

    let files = JobFiles::new(config);
    let store = open_store(config);
    let launcher = ProcessLauncher::from_config(config)?;
    let notifiers = build_notifiers(config);
    let notifier_refs: Vec<&dyn Notifier> = notifiers.iter().map(|n| n.as_ref()).collect();

    let env = WorkerEnv {
        config,
        store: &store,
        files: &files,
        launcher: &launcher,
        notifiers: &notifier_refs,
        output_override: args.output.as_deref(),
    };
    match run_worker(&env, &SystemClock, &key, args.chained, &driver_for)? {
        WorkerOutcome::Failed => Err(anyhow!("job failed; details are in the error logs")),
        WorkerOutcome::Done | WorkerOutcome::Chained | WorkerOutcome::Cancelled => Ok(()),
    }
}

fn build_notifiers(config: &Config) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if let Some(outbox) = &config.outbox_dir {
        notifiers.push(Box::new(SpoolNotifier::new(outbox.clone())));
    }
    if config.desktop_notify {
        notifiers.push(Box::new(DesktopNotifier::new()));
    }
    notifiers
}
