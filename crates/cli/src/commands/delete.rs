// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `baton delete` - remove a job's whole file family.

use super::open_store;
use baton_core::config::Config;
use baton_core::files::JobKey;
use baton_core::store::JobStore;
use baton_core::token::Token;

pub fn handle(token: &Token, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config);
    let count = store.remove_family(&JobKey::Token(token.clone()))?;
    if count == 0 {
        println!("No files found for token {token}");
    } else {
        println!("Removed {count} file(s) for token {token}");
    }
    Ok(())
}
