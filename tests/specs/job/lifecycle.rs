// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-job lifecycle specs: submit, run to completion, view, delete.

use crate::prelude::*;

#[test]
fn single_hop_job_runs_to_done() {
    let p = Project::new();
    p.file("job.toml", &drill_settings(2, 0, ""));
    let token = p.submit("job.toml");

    assert!(p.wait_for_state(&token, "done"), "status: {}", p.status_text(&token));

    let status = p.status_text(&token);
    assert!(status.starts_with("Scrape started.\n"), "unexpected opening: {status}");
    assert!(status.ends_with("DONE"), "missing terminal marker: {status}");

    // One hop: the job never checkpointed.
    assert!(!p.data_file(&token, ".serialize.txt").exists());

    let output = std::fs::read_to_string(p.output_file(&token)).expect("output file");
    assert!(output.contains("Posts by speccer"));
    assert!(output.contains("page 2, post 5 by speccer"));
}

#[test]
fn viewer_renders_narration_state_and_output_location() {
    let p = Project::new();
    p.file("job.toml", &drill_settings(1, 0, ""));
    let token = p.submit("job.toml");
    assert!(p.wait_for_state(&token, "done"));

    let shown = p.pass(&["status", &token]);
    let expected = format!(
        "{}\nState: done\nOutput: {}\n",
        p.status_text(&token),
        p.output_file(&token).display()
    );
    similar_asserts::assert_eq!(shown, expected);
}

#[test]
fn tokenless_run_narrates_to_stdout() {
    let p = Project::new();
    let settings = p.file("cmdline.toml", &drill_settings(2, 0, ""));
    let out = p.path().join("cmdline.html");

    let stdout = p.pass(&[
        "run",
        "--settings",
        settings.to_str().expect("utf8"),
        "--output",
        out.to_str().expect("utf8"),
    ]);
    assert!(stdout.contains("Scrape started."));
    assert!(stdout.contains("Scrape complete."));
    assert!(out.exists());

    // No token, no status file: the data dir holds nothing for this run.
    let data_entries = std::fs::read_dir(p.path().join("data"))
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(data_entries, 0);
}

#[test]
fn delete_removes_the_whole_family() {
    let p = Project::new();
    p.file("job.toml", &drill_settings(1, 0, ""));
    let token = p.submit("job.toml");
    assert!(p.wait_for_state(&token, "done"));

    let stdout = p.pass(&["delete", &token]);
    assert!(stdout.contains("Removed"), "unexpected: {stdout}");
    assert!(!p.data_file(&token, ".settings.txt").exists());
    assert!(!p.data_file(&token, ".status.txt").exists());
    assert!(!p.output_file(&token).exists());

    // Idempotent: a second delete finds nothing.
    let stdout = p.pass(&["delete", &token]);
    assert!(stdout.contains("No files found"), "unexpected: {stdout}");
}
