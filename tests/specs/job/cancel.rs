// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellation specs: the sentinel stops the chain at the next checkpoint
//! and nothing is written afterwards.

use crate::prelude::*;

#[test]
#[serial]
fn cancel_stops_the_job_at_the_next_checkpoint() {
    let p = Project::new();
    // Enough slow pages that the job is still mid-scrape when we cancel.
    p.file("job.toml", &drill_settings(200, 100, ""));
    let token = p.submit("job.toml");
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || !p.status_text(&token).is_empty()),
        "worker never started"
    );

    let stdout = p.pass(&["cancel", &token]);
    assert!(stdout.contains("Cancellation requested"), "unexpected: {stdout}");
    assert!(p.data_file(&token, ".cancel.txt").exists());

    assert!(p.wait_for_state(&token, "cancelled"), "status: {}", p.status_text(&token));
    let status = p.status_text(&token);
    assert!(status.ends_with("CANCELLED"), "missing marker: {status}");

    // Cancelled during the first hop: no checkpoint, no output.
    assert!(!p.data_file(&token, ".serialize.txt").exists());
    assert!(!p.output_file(&token).exists());

    // The marker is the last write; the file must not move afterwards.
    std::thread::sleep(std::time::Duration::from_millis(500));
    similar_asserts::assert_eq!(status, p.status_text(&token));

    // The worker never deletes the sentinel; cleanup owns it.
    assert!(p.data_file(&token, ".cancel.txt").exists());
}

#[test]
fn cancel_after_completion_is_a_noop() {
    let p = Project::new();
    p.file("job.toml", &drill_settings(1, 0, ""));
    let token = p.submit("job.toml");
    assert!(p.wait_for_state(&token, "done"));
    let before = p.status_text(&token);

    let stdout = p.pass(&["cancel", &token]);
    assert!(stdout.contains("already done"), "unexpected: {stdout}");
    assert!(!p.data_file(&token, ".cancel.txt").exists());
    similar_asserts::assert_eq!(before, p.status_text(&token));
}
