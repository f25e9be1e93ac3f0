// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod cancel;
pub mod delete;
pub mod purge;
pub mod run;
pub mod status;
pub mod submit;

use baton_core::config::Config;
use baton_core::files::JobFiles;
use baton_core::store::FsJobStore;

/// The filesystem store every command operates against.
pub(crate) fn open_store(config: &Config) -> FsJobStore {
    FsJobStore::new(JobFiles::new(config))
}
