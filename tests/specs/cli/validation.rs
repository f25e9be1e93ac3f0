// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI surface specs: token validation at the boundary, invalid submissions
//! leaving no trace, and the cleanup commands.

use crate::prelude::*;

#[test]
fn token_length_is_validated_before_any_file_access() {
    let p = Project::new();
    for bad in ["a".repeat(31), "a".repeat(33)] {
        let stderr = p.fail(&["status", &bad]);
        assert!(stderr.contains("32"), "length error should name 32: {stderr}");
    }
}

#[test]
fn token_charset_is_validated_before_any_file_access() {
    let p = Project::new();
    let cases = [
        format!("{}A", "a".repeat(31)),
        format!("{}.", "a".repeat(31)),
        format!("{} ", "a".repeat(31)),
        format!("{}/", "a".repeat(31)),
    ];
    for bad in cases {
        let stderr = p.fail(&["status", &bad]);
        assert!(stderr.contains("invalid character"), "unexpected: {stderr}");
    }
}

#[test]
fn status_of_an_unknown_token_reads_as_running() {
    let p = Project::new();
    let token = "z".repeat(32);
    assert_eq!(p.state(&token), "running");
}

#[test]
fn invalid_settings_are_rejected_without_leaving_files() {
    let p = Project::new();
    let settings = p.file("bad.toml", "forum = \"drill\"\n"); // missing base_url
    let stderr = p.fail(&["submit", settings.to_str().expect("utf8")]);
    assert!(stderr.contains("settings"), "unexpected: {stderr}");

    let data_entries =
        std::fs::read_dir(p.path().join("data")).map(|e| e.count()).unwrap_or(0);
    assert_eq!(data_entries, 0, "a rejected submission must leave no trace");
}

#[test]
fn cancel_of_an_unknown_token_fails() {
    let p = Project::new();
    let stderr = p.fail(&["cancel", &"q".repeat(32)]);
    assert!(stderr.contains("no job found"), "unexpected: {stderr}");
}

#[test]
fn purge_honors_the_minimum_age() {
    let p = Project::new();
    p.file("job.toml", &drill_settings(1, 0, ""));
    let token = p.submit("job.toml");
    assert!(p.wait_for_state(&token, "done"));

    // Default minimum age: a fresh job is untouched.
    let stdout = p.pass(&["purge"]);
    assert!(stdout.contains("Purged 0 job(s)"), "unexpected: {stdout}");
    assert!(p.data_file(&token, ".status.txt").exists());

    // Age zero: everything qualifies.
    let stdout = p.pass(&["purge", "--min-age-days", "0"]);
    assert!(stdout.contains(&token), "unexpected: {stdout}");
    assert!(stdout.contains("Purged 1 job(s)"), "unexpected: {stdout}");
    assert!(!p.data_file(&token, ".status.txt").exists());
    assert!(!p.output_file(&token).exists());
}
