// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chain handoff specs: a one-second budget against pages that take longer,
//! forcing checkpoint-and-spawn hops between worker processes.

use crate::prelude::*;

/// Three 1.1-second pages against a 1-second budget: each worker gets one
/// page done, so the chain needs exactly two hops.
#[test]
#[serial]
fn one_second_budget_chains_twice_and_completes() {
    let p = Project::with_config("chain_duration_secs = 1");
    p.file("job.toml", &drill_settings(3, 1100, ""));
    let token = p.submit("job.toml");

    assert!(p.wait_for_state(&token, "done"), "status: {}", p.status_text(&token));

    let status = p.status_text(&token);
    assert_eq!(
        status.matches("Continuing in a fresh worker.").count(),
        2,
        "expected exactly two hops: {status}"
    );
    assert!(status.contains("Resuming scrape (worker 2)."));
    assert!(status.contains("Resuming scrape (worker 3)."));
    assert!(status.ends_with("DONE"));

    // The checkpoint survives as the last hop's snapshot, pointing at the
    // final worker.
    let cp_text = std::fs::read_to_string(p.data_file(&token, ".serialize.txt"))
        .expect("checkpoint file");
    let cp: serde_json::Value = serde_json::from_str(&cp_text).expect("checkpoint JSON");
    assert_eq!(cp["hop"], 3);

    // Progress carried across both hops into one output.
    let output = std::fs::read_to_string(p.output_file(&token)).expect("output file");
    for page in 1..=3 {
        assert!(output.contains(&format!("page {page}, post 1 by speccer")));
    }
}

/// The status file is one total order across the whole chain: a successor's
/// first line lands after its predecessor's last.
#[test]
#[serial]
fn status_lines_stay_ordered_across_hops() {
    let p = Project::with_config("chain_duration_secs = 1");
    p.file("job.toml", &drill_settings(2, 1100, ""));
    let token = p.submit("job.toml");
    assert!(p.wait_for_state(&token, "done"), "status: {}", p.status_text(&token));

    let status = p.status_text(&token);
    let landmarks = [
        "Scrape started.",
        "Retrieved page 1",
        "Continuing in a fresh worker.",
        "Resuming scrape (worker 2).",
        "Scrape complete.",
    ];
    let mut last = 0;
    for mark in landmarks {
        let pos = status[last..]
            .find(mark)
            .unwrap_or_else(|| panic!("{mark:?} missing or out of order in: {status}"));
        last += pos;
    }
}
