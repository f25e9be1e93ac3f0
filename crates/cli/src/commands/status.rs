// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `baton status` - the viewer.
//!
//! Read-only over the job's files: narration, tail classification, user
//! errors when the job failed, and the output location once done. `--watch`
//! polls until a terminal marker appears, printing narration as it arrives.

use super::open_store;
use anyhow::Result;
use baton_core::config::Config;
use baton_core::files::{FileKind, JobFiles, JobKey};
use baton_core::status::{classify, StatusFlags};
use baton_core::store::JobStore;
use baton_core::token::Token;
use clap::Args;
use std::time::Duration;

#[derive(Args)]
pub struct StatusArgs {
    /// Job token
    pub token: Token,

    /// Poll until the job reaches a terminal state
    #[arg(long)]
    pub watch: bool,

    /// Poll interval in seconds for --watch
    #[arg(long, default_value = "5", value_name = "SECS")]
    pub interval_secs: u64,

    /// Print a one-shot JSON snapshot instead of text
    #[arg(long, conflicts_with = "watch")]
    pub json: bool,
}

pub fn handle(args: StatusArgs, config: &Config) -> Result<()> {
    let files = JobFiles::new(config);
    let store = open_store(config);
    let snap = Snapshot::take(&store, &files, &args.token)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap.to_json(&args.token))?);
        return Ok(());
    }
    if !args.watch {
        print!("{}", snap.render());
        return Ok(());
    }

    // Watch: print narration incrementally, then the closing summary.
    let mut seen = 0;
    let mut snap = snap;
    loop {
        let text = &snap.status_text;
        if text.len() > seen {
            print!("{}", &text[seen..]);
            seen = text.len();
        }
        if snap.flags.is_terminal() {
            println!();
            print!("{}", snap.render_summary());
            return Ok(());
        }
        std::thread::sleep(Duration::from_secs(args.interval_secs.max(1)));
        snap = Snapshot::take(&store, &files, &args.token)?;
    }
}

/// One consistent read of everything the viewer shows.
struct Snapshot {
    status_text: String,
    flags: StatusFlags,
    user_errors: Option<String>,
    output_location: Option<String>,
}

impl Snapshot {
    fn take(store: &dyn JobStore, files: &JobFiles, token: &Token) -> Result<Self> {
        let key = JobKey::Token(token.clone());
        let status_text = store.read(&key, FileKind::Status)?.unwrap_or_default();
        let flags = classify(&status_text);
        let user_errors = store.read(&key, FileKind::UserErrors)?;
        let output_location = flags.done.then(|| {
            files
                .output_url(token)
                .unwrap_or_else(|| files.path(&key, FileKind::Output).display().to_string())
        });
        Ok(Self { status_text, flags, user_errors, output_location })
    }

    fn render(&self) -> String {
        let mut out = String::new();
        if self.status_text.is_empty() {
            out.push_str("(no status yet)\n");
        } else {
            out.push_str(&self.status_text);
            if !self.status_text.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push_str(&self.render_summary());
        out
    }

    fn render_summary(&self) -> String {
        let mut out = format!("State: {}\n", self.flags.state_name());
        if let Some(location) = &self.output_location {
            out.push_str(&format!("Output: {location}\n"));
        }
        if self.flags.failed {
            match &self.user_errors {
                Some(errs) if !errs.is_empty() => {
                    out.push_str("Errors:\n");
                    out.push_str(errs);
                    if !errs.ends_with('\n') {
                        out.push('\n');
                    }
                }
                _ => out.push_str("Errors: (no detail recorded)\n"),
            }
        }
        out
    }

    fn to_json(&self, token: &Token) -> serde_json::Value {
        serde_json::json!({
            "token": token,
            "state": self.flags.state_name(),
            "status": self.status_text,
            "user_errors": self.user_errors,
            "output": self.output_location,
        })
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
