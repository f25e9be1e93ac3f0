// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! The chain scheduler budgets elapsed time and the purge pass compares
//! file ages against wall-clock time; both go through [`Clock`] so tests
//! can drive time instead of sleeping.

use std::time::{Instant, SystemTime};

/// A clock that provides monotonic and wall-clock time.
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;
    fn wall(&self) -> SystemTime;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant, SystemTime};

    /// Fake clock for testing with controllable time
    #[derive(Clone)]
    pub struct FakeClock {
        current: Arc<Mutex<Instant>>,
        wall: Arc<Mutex<SystemTime>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self {
                current: Arc::new(Mutex::new(Instant::now())),
                wall: Arc::new(Mutex::new(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000))),
            }
        }

        /// Advance both monotonic and wall time by the given duration
        pub fn advance(&self, duration: Duration) {
            *self.current.lock() += duration;
            *self.wall.lock() += duration;
        }

        /// Set the wall clock to a specific time
        pub fn set_wall(&self, time: SystemTime) {
            *self.wall.lock() = time;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.current.lock()
        }

        fn wall(&self) -> SystemTime {
            *self.wall.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
