// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Workers in a chain inherit these from the launcher; the config layer
//! applies them on top of values loaded from file.

use std::path::PathBuf;

/// Config file override (`BATON_CONFIG`)
pub fn config_path() -> Option<PathBuf> {
    std::env::var("BATON_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Data directory override (`BATON_DATA_DIR`)
pub fn data_dir() -> Option<PathBuf> {
    std::env::var("BATON_DATA_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Output directory override (`BATON_OUTPUT_DIR`)
pub fn output_dir() -> Option<PathBuf> {
    std::env::var("BATON_OUTPUT_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Host execution-time ceiling in seconds (`BATON_TIME_CEILING_SECS`).
/// Shared hosts expose their kill limit here so the chain duration can be
/// derived from it.
pub fn time_ceiling_secs() -> Option<u64> {
    std::env::var("BATON_TIME_CEILING_SECS").ok().and_then(|s| s.parse::<u64>().ok())
}

/// Fixed chain duration override in seconds (`BATON_CHAIN_DURATION_SECS`)
pub fn chain_duration_secs() -> Option<u64> {
    std::env::var("BATON_CHAIN_DURATION_SECS").ok().and_then(|s| s.parse::<u64>().ok())
}

/// Worker binary override (`BATON_WORKER_BIN`)
pub fn worker_bin() -> Option<PathBuf> {
    std::env::var("BATON_WORKER_BIN").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
