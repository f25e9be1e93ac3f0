// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `baton submit` - start a new job chain.

use super::open_store;
use anyhow::{Context, Result};
use baton_core::config::Config;
use baton_engine::launch::ProcessLauncher;
use baton_engine::submit::submit;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SubmitArgs {
    /// Settings file describing the scrape
    pub settings: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: SubmitArgs, config: &Config) -> Result<()> {
    let settings_text = std::fs::read_to_string(&args.settings)
        .with_context(|| format!("failed to read settings file {}", args.settings.display()))?;
    let store = open_store(config);
    let launcher = ProcessLauncher::from_config(config)?;
    let token = submit(&store, &launcher, config, &settings_text)?;
    if args.json {
        println!("{}", serde_json::json!({ "token": token }));
    } else {
        println!("{token}");
    }
    Ok(())
}
