// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the spec suite.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub use serial_test::serial;

/// Upper bound for polling loops. Chained scenarios stack several one-second
/// pages, so this is generous rather than tight.
pub const SPEC_WAIT_MAX_MS: u64 = 60_000;

/// Poll `cond` until it holds or `max_ms` elapses.
pub fn wait_for(max_ms: u64, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    loop {
        if cond() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// Settings text for a drill scrape. `extra` is appended inside the
/// `[driver]` table.
pub fn drill_settings(pages: u32, page_delay_ms: u64, extra: &str) -> String {
    format!(
        "forum = \"drill\"\nbase_url = \"drill://spec\"\nextract_user = \"speccer\"\n\n\
         [driver]\npages = {pages}\npage_delay_ms = {page_delay_ms}\n{extra}"
    )
}

/// One spec's isolated on-disk world: data, output and outbox directories
/// plus the config file every `baton` invocation is pointed at.
pub struct Project {
    root: TempDir,
}

impl Project {
    /// A project whose config carries only the directory layout.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// A project with extra top-level config keys, given as TOML text.
    pub fn with_config(extra: &str) -> Self {
        let root = TempDir::new().expect("create spec tempdir");
        let mut table: toml::Table = extra.parse().expect("extra config must be valid TOML");
        let path_of = |name: &str| toml::Value::String(root.path().join(name).display().to_string());
        table.insert("data_dir".into(), path_of("data"));
        table.insert("output_dir".into(), path_of("output"));
        table.insert("outbox_dir".into(), path_of("outbox"));
        std::fs::write(root.path().join("baton.toml"), toml::to_string(&table).unwrap())
            .expect("write config");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("baton.toml")
    }

    /// Write a file under the project root and return its absolute path.
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        std::fs::write(&path, contents).expect("write project file");
        path
    }

    /// A `baton` invocation pointed at this project's config.
    pub fn baton(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("baton").expect("baton binary");
        cmd.env("BATON_CONFIG", self.config_path());
        for var in [
            "BATON_DATA_DIR",
            "BATON_OUTPUT_DIR",
            "BATON_CHAIN_DURATION_SECS",
            "BATON_TIME_CEILING_SECS",
            "BATON_WORKER_BIN",
        ] {
            cmd.env_remove(var);
        }
        cmd.timeout(Duration::from_millis(SPEC_WAIT_MAX_MS));
        cmd
    }

    /// Run a `baton` command that must succeed; returns stdout.
    pub fn pass(&self, args: &[&str]) -> String {
        let output = self.baton().args(args).assert().success().get_output().clone();
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Run a `baton` command that must fail; returns stderr.
    pub fn fail(&self, args: &[&str]) -> String {
        let output = self.baton().args(args).assert().failure().get_output().clone();
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    /// Submit a settings file and return the token.
    pub fn submit(&self, settings_rel: &str) -> String {
        let settings = self.root.path().join(settings_rel);
        let stdout = self.pass(&["submit", settings.to_str().expect("utf8 path")]);
        let token = stdout.trim().to_string();
        assert_eq!(token.len(), 32, "submit should print a token, got: {stdout}");
        token
    }

    // ── Job file access ─────────────────────────────────────────────────

    pub fn data_file(&self, token: &str, suffix: &str) -> PathBuf {
        self.root.path().join("data").join(format!("{token}{suffix}"))
    }

    pub fn output_file(&self, token: &str) -> PathBuf {
        self.root.path().join("output").join(format!("{token}.html"))
    }

    pub fn status_text(&self, token: &str) -> String {
        std::fs::read_to_string(self.data_file(token, ".status.txt")).unwrap_or_default()
    }

    /// The job's state as classified by the viewer.
    pub fn state(&self, token: &str) -> String {
        let stdout = self.pass(&["status", token, "--json"]);
        let json: serde_json::Value = serde_json::from_str(&stdout).expect("status --json output");
        json["state"].as_str().expect("state field").to_string()
    }

    /// Wait until the viewer classifies the job as `want`.
    pub fn wait_for_state(&self, token: &str, want: &str) -> bool {
        wait_for(SPEC_WAIT_MAX_MS, || self.state(token) == want)
    }

    pub fn outbox_files(&self) -> Vec<PathBuf> {
        let dir = self.root.path().join("outbox");
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries.map(|e| e.expect("outbox entry").path()).collect();
        files.sort();
        files
    }
}
