// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage contract for job file families.
//!
//! Workers, the submitting process, and the viewer all go through
//! [`JobStore`]; the protocol lives in who writes what when, not in locks.
//! [`FsJobStore`] is the real filesystem implementation, [`MemJobStore`]
//! the in-memory fake core logic is tested against.

use crate::files::{FileKind, JobFiles, JobKey};
use crate::token::Token;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op} failed for {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Content operations over a job's file family.
///
/// `read` returns `None` for files that do not exist yet; the viewer polls
/// status files before the first worker has written one, and absence is a
/// normal protocol state (the cancel sentinel in particular).
pub trait JobStore: Send + Sync {
    fn read(&self, key: &JobKey, kind: FileKind) -> Result<Option<String>, StoreError>;
    /// Replace the file wholesale.
    fn write(&self, key: &JobKey, kind: FileKind, contents: &str) -> Result<(), StoreError>;
    /// Append to the file, creating it if absent.
    fn append(&self, key: &JobKey, kind: FileKind, contents: &str) -> Result<(), StoreError>;
    fn exists(&self, key: &JobKey, kind: FileKind) -> bool;
    /// Remove one file; `false` if it was not present.
    fn remove(&self, key: &JobKey, kind: FileKind) -> Result<bool, StoreError>;
    /// Remove every family member, reporting how many existed.
    fn remove_family(&self, key: &JobKey) -> Result<usize, StoreError>;
    /// Most recent modification across the family, if any member exists.
    fn newest_modified(&self, key: &JobKey) -> Result<Option<SystemTime>, StoreError>;
    /// Every token with at least one file in the store.
    fn tokens(&self) -> Result<Vec<Token>, StoreError>;

    fn family_exists(&self, key: &JobKey) -> bool {
        FileKind::ALL.iter().any(|kind| self.exists(key, *kind))
    }
}

/// Family members owned by a key. Settings-keyed commandline runs only ever
/// materialize sidecars next to the user's own settings file; the rest of
/// the family (and the settings file itself) is not the store's to remove.
fn owned_kinds(key: &JobKey) -> &'static [FileKind] {
    match key {
        JobKey::Token(_) => &FileKind::ALL,
        JobKey::Settings(_) => &[FileKind::Checkpoint, FileKind::Cookies],
    }
}

/// Remove every family older than `min_age`, judged by the newest file in
/// the family against `now`. Returns the tokens removed.
pub fn purge(
    store: &dyn JobStore,
    min_age: Duration,
    now: SystemTime,
) -> Result<Vec<Token>, StoreError> {
    let Some(cutoff) = now.checked_sub(min_age) else {
        return Ok(Vec::new());
    };
    let mut removed = Vec::new();
    for token in store.tokens()? {
        let key = JobKey::Token(token.clone());
        let Some(newest) = store.newest_modified(&key)? else {
            continue;
        };
        if newest <= cutoff {
            let count = store.remove_family(&key)?;
            tracing::info!(%token, files = count, "purged expired job");
            removed.push(token);
        }
    }
    Ok(removed)
}

/// Filesystem-backed store.
#[derive(Debug, Clone)]
pub struct FsJobStore {
    files: JobFiles,
}

impl FsJobStore {
    pub fn new(files: JobFiles) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &JobFiles {
        &self.files
    }

    fn ensure_parent(&self, path: &std::path::Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                op: "create dir",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

impl JobStore for FsJobStore {
    fn read(&self, key: &JobKey, kind: FileKind) -> Result<Option<String>, StoreError> {
        let path = self.files.path(key, kind);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { op: "read", path, source }),
        }
    }

    fn write(&self, key: &JobKey, kind: FileKind, contents: &str) -> Result<(), StoreError> {
        let path = self.files.path(key, kind);
        self.ensure_parent(&path)?;
        std::fs::write(&path, contents)
            .map_err(|source| StoreError::Io { op: "write", path, source })
    }

    fn append(&self, key: &JobKey, kind: FileKind, contents: &str) -> Result<(), StoreError> {
        let path = self.files.path(key, kind);
        self.ensure_parent(&path)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io { op: "append", path: path.clone(), source })?;
        file.write_all(contents.as_bytes())
            .map_err(|source| StoreError::Io { op: "append", path, source })
    }

    fn exists(&self, key: &JobKey, kind: FileKind) -> bool {
        self.files.path(key, kind).exists()
    }

    fn remove(&self, key: &JobKey, kind: FileKind) -> Result<bool, StoreError> {
        let path = self.files.path(key, kind);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { op: "remove", path, source }),
        }
    }

    fn remove_family(&self, key: &JobKey) -> Result<usize, StoreError> {
        let mut count = 0;
        for kind in owned_kinds(key) {
            if self.remove(key, *kind)? {
                count += 1;
            }
        }
        Ok(count)
    }

    fn newest_modified(&self, key: &JobKey) -> Result<Option<SystemTime>, StoreError> {
        let mut newest: Option<SystemTime> = None;
        for kind in owned_kinds(key) {
            let path = self.files.path(key, *kind);
            let modified = match std::fs::metadata(&path) {
                Ok(meta) => meta
                    .modified()
                    .map_err(|source| StoreError::Io { op: "stat", path, source })?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => return Err(StoreError::Io { op: "stat", path, source }),
            };
            newest = Some(newest.map_or(modified, |n| n.max(modified)));
        }
        Ok(newest)
    }

    fn tokens(&self) -> Result<Vec<Token>, StoreError> {
        let dir = self.files.data_dir();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io { op: "scan", path: dir.to_path_buf(), source })
            }
        };
        let mut tokens = BTreeSet::new();
        for entry in entries {
            let entry = entry
                .map_err(|source| StoreError::Io { op: "scan", path: dir.to_path_buf(), source })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some((prefix, _)) = name.split_once('.') else { continue };
            if let Ok(token) = Token::parse(prefix) {
                tokens.insert(token);
            }
        }
        Ok(tokens.into_iter().collect())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{owned_kinds, JobStore, StoreError};
    use crate::files::{FileKind, JobKey};
    use crate::token::Token;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::SystemTime;

    #[derive(Clone)]
    struct MemEntry {
        contents: String,
        modified: SystemTime,
    }

    /// In-memory store fake for core logic tests.
    #[derive(Clone, Default)]
    pub struct MemJobStore {
        inner: Arc<Mutex<HashMap<JobKey, HashMap<FileKind, MemEntry>>>>,
    }

    impl MemJobStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Backdate a file so purge-age logic can be tested without sleeping.
        pub fn set_modified(&self, key: &JobKey, kind: FileKind, modified: SystemTime) {
            if let Some(entry) =
                self.inner.lock().get_mut(key).and_then(|family| family.get_mut(&kind))
            {
                entry.modified = modified;
            }
        }
    }

    impl JobStore for MemJobStore {
        fn read(&self, key: &JobKey, kind: FileKind) -> Result<Option<String>, StoreError> {
            Ok(self
                .inner
                .lock()
                .get(key)
                .and_then(|family| family.get(&kind))
                .map(|entry| entry.contents.clone()))
        }

        fn write(&self, key: &JobKey, kind: FileKind, contents: &str) -> Result<(), StoreError> {
            self.inner.lock().entry(key.clone()).or_default().insert(
                kind,
                MemEntry { contents: contents.to_owned(), modified: SystemTime::now() },
            );
            Ok(())
        }

        fn append(&self, key: &JobKey, kind: FileKind, contents: &str) -> Result<(), StoreError> {
            let mut inner = self.inner.lock();
            let entry = inner.entry(key.clone()).or_default().entry(kind).or_insert(MemEntry {
                contents: String::new(),
                modified: SystemTime::now(),
            });
            entry.contents.push_str(contents);
            entry.modified = SystemTime::now();
            Ok(())
        }

        fn exists(&self, key: &JobKey, kind: FileKind) -> bool {
            self.inner.lock().get(key).is_some_and(|family| family.contains_key(&kind))
        }

        fn remove(&self, key: &JobKey, kind: FileKind) -> Result<bool, StoreError> {
            Ok(self
                .inner
                .lock()
                .get_mut(key)
                .and_then(|family| family.remove(&kind))
                .is_some())
        }

        fn remove_family(&self, key: &JobKey) -> Result<usize, StoreError> {
            let mut count = 0;
            for kind in owned_kinds(key) {
                if self.remove(key, *kind)? {
                    count += 1;
                }
            }
            Ok(count)
        }

        fn newest_modified(&self, key: &JobKey) -> Result<Option<SystemTime>, StoreError> {
            Ok(self
                .inner
                .lock()
                .get(key)
                .and_then(|family| family.values().map(|entry| entry.modified).max()))
        }

        fn tokens(&self) -> Result<Vec<Token>, StoreError> {
            let mut tokens: Vec<Token> =
                self.inner.lock().keys().filter_map(|key| key.token().cloned()).collect();
            tokens.sort();
            Ok(tokens)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::MemJobStore;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
