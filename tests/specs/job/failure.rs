// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure-path specs: a fatal driver error ends the chain as failed, both
//! error logs record it, and exactly one capped notification is spooled.

use crate::prelude::*;

#[test]
fn fatal_scrape_error_marks_failed_and_notifies_once() {
    // A tiny user-log cap so the spooled report demonstrably truncates.
    let p = Project::with_config("user_error_cap_bytes = 48");
    p.file("job.toml", &drill_settings(5, 0, "fail_at_page = 2\n"));
    let token = p.submit("job.toml");

    assert!(p.wait_for_state(&token, "failed"), "status: {}", p.status_text(&token));

    let status = p.status_text(&token);
    assert!(status.ends_with("EXITING"), "missing marker: {status}");
    assert!(status.contains("page 2 could not be retrieved"));

    let user_log = std::fs::read_to_string(p.data_file(&token, ".errs.txt")).expect("user log");
    assert!(user_log.contains("page 2 could not be retrieved"));
    let admin_log =
        std::fs::read_to_string(p.data_file(&token, ".errs.admin.txt")).expect("admin log");
    assert!(admin_log.contains("scrape driver error"));

    // Exactly one spooled report, carrying the token and both logs.
    let outbox = p.outbox_files();
    assert_eq!(outbox.len(), 1, "expected one notification, got {outbox:?}");
    let mail = std::fs::read_to_string(&outbox[0]).expect("spooled report");
    assert!(mail.contains(&token));
    assert!(mail.contains("-- user log --"));
    assert!(mail.contains("-- admin log --"));

    // The user-log section was cut at the 48-byte cap, mid-line.
    let user_section = mail
        .split("-- user log --\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\n-- admin log --").next())
        .expect("user log section");
    assert!(user_section.len() <= 48, "cap not applied: {user_section:?}");
    assert!(!user_section.ends_with('\n'), "a capped log should cut mid-line");

    // The viewer surfaces the user log, never the admin log.
    let shown = p.pass(&["status", &token]);
    assert!(shown.contains("State: failed"));
    assert!(shown.contains("Errors:"));
    assert!(shown.contains("page 2 could not be retrieved"));
    assert!(!shown.contains("scrape driver error"));
}
