// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `baton cancel` - create the cancellation sentinel.

use super::open_store;
use anyhow::{anyhow, Result};
use baton_core::cancel;
use baton_core::config::Config;
use baton_core::files::JobKey;
use baton_core::status;
use baton_core::store::JobStore;
use baton_core::token::Token;

pub fn handle(token: &Token, config: &Config) -> Result<()> {
    let store = open_store(config);
    if !store.family_exists(&JobKey::Token(token.clone())) {
        return Err(anyhow!("no job found for token {token}"));
    }
    let flags = status::classify_for(&store, token)?;
    if flags.is_terminal() {
        println!("Job already {}; nothing to cancel", flags.state_name());
        return Ok(());
    }
    cancel::request(&store, token)?;
    println!("Cancellation requested; the job will stop at its next checkpoint");
    Ok(())
}
