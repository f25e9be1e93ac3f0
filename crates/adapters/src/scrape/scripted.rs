// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted scraper for engine tests: plays back a programmed sequence of
//! step outcomes and records what the engine asked of it.

use super::{ScrapeError, Scraper, StepOutcome};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Default)]
struct ScriptedState {
    outcomes: VecDeque<Result<StepOutcome, ScrapeError>>,
    resumed_with: Vec<Value>,
    steps_taken: u32,
}

/// Clones share state, so a test can keep a handle while the engine owns
/// the boxed scraper.
#[derive(Clone, Default)]
pub struct ScriptedScraper {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(self, note: &str) -> Self {
        self.state
            .lock()
            .outcomes
            .push_back(Ok(StepOutcome::Advanced { note: note.to_string() }));
        self
    }

    pub fn complete(self, output: &str) -> Self {
        self.state
            .lock()
            .outcomes
            .push_back(Ok(StepOutcome::Complete { output: output.to_string() }));
        self
    }

    pub fn fail(self, error: ScrapeError) -> Self {
        self.state.lock().outcomes.push_back(Err(error));
        self
    }

    pub fn steps_taken(&self) -> u32 {
        self.state.lock().steps_taken
    }

    pub fn resumed_with(&self) -> Vec<Value> {
        self.state.lock().resumed_with.clone()
    }
}

impl Scraper for ScriptedScraper {
    fn resume(&mut self, progress: &Value) -> Result<(), ScrapeError> {
        self.state.lock().resumed_with.push(progress.clone());
        Ok(())
    }

    fn step(&mut self) -> Result<StepOutcome, ScrapeError> {
        let mut state = self.state.lock();
        state.steps_taken += 1;
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Err(ScrapeError::Driver("scripted outcomes exhausted".to_string())))
    }

    fn progress(&self) -> Value {
        serde_json::json!({ "steps_taken": self.state.lock().steps_taken })
    }
}
