// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `baton` - chained scrape-job orchestrator CLI.
//!
//! One binary serves both sides of the protocol: `submit`, `status`,
//! `cancel`, `delete` and `purge` are the operator surface, while `run` is
//! the worker entry point the launcher invokes, including the continuation
//! invocations the active worker issues just before it exits.

mod commands;

use anyhow::Result;
use baton_core::config::Config;
use baton_core::token::Token;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "baton", version, about = "Forum scrape jobs that outlive a single process")]
struct Cli {
    /// Config file (falls back to the BATON_CONFIG environment variable)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one worker process (invoked by the launcher, not usually by hand)
    Run(commands::run::RunArgs),
    /// Submit a new scrape job and print its token
    Submit(commands::submit::SubmitArgs),
    /// Show a job's progress narration and state
    Status(commands::status::StatusArgs),
    /// Request cancellation of a running job
    Cancel {
        /// Job token
        token: Token,
    },
    /// Delete every file belonging to a job
    Delete {
        /// Job token
        token: Token,
    },
    /// Remove files of jobs untouched for longer than the minimum age
    Purge(commands::purge::PurgeArgs),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Run(args) => commands::run::handle(args, &config),
        Command::Submit(args) => commands::submit::handle(args, &config),
        Command::Status(args) => commands::status::handle(args, &config),
        Command::Cancel { token } => commands::cancel::handle(&token, &config),
        Command::Delete { token } => commands::delete::handle(&token, &config),
        Command::Purge(args) => commands::purge::handle(args, &config),
    }
}

/// Diagnostics go to stderr: for a tokened worker the launcher has already
/// redirected stderr into that job's admin error file.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("BATON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
