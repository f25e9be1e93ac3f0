// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic mapping from a job key to its file family.
//!
//! Every coordination file a job owns lives at a name derived from its
//! token (or, for tokenless commandline runs, from the settings file path),
//! so any process holding the key can find every file without negotiation.

use crate::config::Config;
use crate::token::Token;
use std::path::{Path, PathBuf};

/// One file in a job's on-disk family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Scrape configuration, written once at submission
    Settings,
    /// Resume envelope handed from one worker to the next
    Checkpoint,
    /// HTTP session cookies owned by the scrape driver
    Cookies,
    /// Append-only progress narration and terminal marker
    Status,
    /// Display-safe error log shown to the submitting user
    UserErrors,
    /// Detailed error log for the operator
    AdminErrors,
    /// Cancellation sentinel; presence is the signal
    Cancel,
    /// Rendered scrape result
    Output,
}

impl FileKind {
    /// Every member of a job's file family.
    pub const ALL: [FileKind; 8] = [
        FileKind::Settings,
        FileKind::Checkpoint,
        FileKind::Cookies,
        FileKind::Status,
        FileKind::UserErrors,
        FileKind::AdminErrors,
        FileKind::Cancel,
        FileKind::Output,
    ];

    /// File name suffix appended to the job key.
    pub fn suffix(self) -> &'static str {
        match self {
            FileKind::Settings => ".settings.txt",
            FileKind::Checkpoint => ".serialize.txt",
            FileKind::Cookies => ".cookies.txt",
            FileKind::Status => ".status.txt",
            FileKind::UserErrors => ".errs.txt",
            FileKind::AdminErrors => ".errs.admin.txt",
            FileKind::Cancel => ".cancel.txt",
            FileKind::Output => ".html",
        }
    }
}

crate::simple_display! {
    FileKind {
        Settings => "settings",
        Checkpoint => "checkpoint",
        Cookies => "cookies",
        Status => "status",
        UserErrors => "user-errors",
        AdminErrors => "admin-errors",
        Cancel => "cancel",
        Output => "output",
    }
}

/// Identity a job's files are keyed by.
///
/// Web-submitted jobs are keyed by token. Commandline runs without a token
/// are keyed by their settings file path; they only ever materialize the
/// checkpoint and cookies members, named by appending the standard suffix
/// to that path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKey {
    Token(Token),
    Settings(PathBuf),
}

impl JobKey {
    pub fn token(&self) -> Option<&Token> {
        match self {
            JobKey::Token(t) => Some(t),
            JobKey::Settings(_) => None,
        }
    }
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKey::Token(t) => write!(f, "{t}"),
            JobKey::Settings(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Pure path mapping for job file families.
#[derive(Debug, Clone)]
pub struct JobFiles {
    data_dir: PathBuf,
    output_dir: PathBuf,
    output_url_base: Option<String>,
}

impl JobFiles {
    pub fn new(config: &Config) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            output_dir: config.output_dir.clone(),
            output_url_base: config.output_url_base.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Resolve the path of one family member.
    ///
    /// Token keys map into the data directory (output into the output
    /// directory). Settings-path keys return the settings path itself for
    /// [`FileKind::Settings`] and suffix-appended siblings for the rest.
    pub fn path(&self, key: &JobKey, kind: FileKind) -> PathBuf {
        match key {
            JobKey::Token(token) => {
                let name = format!("{}{}", token, kind.suffix());
                match kind {
                    FileKind::Output => self.output_dir.join(name),
                    _ => self.data_dir.join(name),
                }
            }
            JobKey::Settings(path) => match kind {
                FileKind::Settings => path.clone(),
                _ => {
                    let mut name = path.clone().into_os_string();
                    name.push(kind.suffix());
                    PathBuf::from(name)
                }
            },
        }
    }

    /// Browser-facing URL of a token's output, when a web base is configured.
    pub fn output_url(&self, token: &Token) -> Option<String> {
        self.output_url_base
            .as_deref()
            .map(|base| format!("{}/{}{}", base.trim_end_matches('/'), token, FileKind::Output.suffix()))
    }
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
