// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chain timing: when the active worker must stop, checkpoint, and hand off.

use baton_core::clock::Clock;
use baton_core::config::Config;
use std::time::{Duration, Instant};

/// Per-worker budget used when neither a fixed duration nor a host ceiling
/// is configured.
pub const FALLBACK_CHAIN_DURATION_SECS: u64 = 1200;

/// Lifecycle of one worker process within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Starting,
    Running,
    /// Budget spent; checkpoint written and a successor launched
    Chaining,
    Done,
    Cancelled,
    Failed,
}

impl ChainState {
    /// Terminal for the job as a whole. `Chaining` ends this process but
    /// the job stays running under the successor.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Failed)
    }
}

baton_core::simple_display! {
    ChainState {
        Starting => "starting",
        Running => "running",
        Chaining => "chaining",
        Done => "done",
        Cancelled => "cancelled",
        Failed => "failed",
    }
}

/// Elapsed-time budget armed when a worker starts.
#[derive(Debug, Clone, Copy)]
pub struct ChainBudget {
    deadline: Instant,
}

impl ChainBudget {
    pub fn start(clock: &impl Clock, duration: Duration) -> Self {
        Self { deadline: clock.now() + duration }
    }

    /// True once the worker must checkpoint and hand off.
    pub fn exhausted(&self, clock: &impl Clock) -> bool {
        clock.now() >= self.deadline
    }
}

/// Resolve the per-worker chain duration.
///
/// A fixed configured value wins. Otherwise the duration is derived from
/// the host's execution ceiling minus the safety margin; the margin must
/// leave room for the checkpoint-and-handoff to complete before the host
/// kills the process, which remains a deployment-tuning concern.
pub fn resolve_chain_duration(config: &Config) -> Duration {
    let secs = match (config.chain_duration_secs, config.time_ceiling_secs) {
        (Some(fixed), _) => fixed.max(1),
        (None, Some(ceiling)) if ceiling > 0 => {
            ceiling.saturating_sub(config.time_margin_secs).max(1)
        }
        _ => FALLBACK_CHAIN_DURATION_SECS,
    };
    Duration::from_secs(secs)
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
