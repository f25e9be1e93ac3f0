// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `baton purge` - scheduled cleanup of abandoned job files.

use super::open_store;
use baton_core::config::Config;
use baton_core::store::purge;
use clap::Args;
use std::time::{Duration, SystemTime};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Args)]
pub struct PurgeArgs {
    /// Minimum days since the family's newest file changed (default from config)
    #[arg(long, value_name = "DAYS")]
    pub min_age_days: Option<u64>,
}

pub fn handle(args: PurgeArgs, config: &Config) -> anyhow::Result<()> {
    let days = args.min_age_days.unwrap_or(config.purge_min_age_days);
    let store = open_store(config);
    let removed = purge(&store, min_age(days), SystemTime::now())?;
    for token in &removed {
        println!("{token}");
    }
    println!("Purged {} job(s) older than {days} day(s)", removed.len());
    Ok(())
}

/// Day count to duration, saturating on absurd inputs.
fn min_age(days: u64) -> Duration {
    Duration::from_secs(days.saturating_mul(SECS_PER_DAY))
}

#[cfg(test)]
#[path = "purge_tests.rs"]
mod tests;
