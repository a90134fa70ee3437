// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Time sources reporting whole UNIX seconds.
//!
//! Components that age state over wall-clock time read "now" through the [`Clock`] trait so
//! that tests can substitute a [`TestClock`] and advance time deterministically.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicI64, Ordering},
};

use chrono::Utc;

/// Seconds since the UNIX epoch (1970-01-01T00:00:00Z).
///
/// Signed so that out-of-order readings produce a negative elapsed time instead of wrapping.
pub type UnixSecs = i64;

/// A source of the current time in UNIX seconds.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current UNIX timestamp in seconds.
    fn timestamp_secs(&self) -> UnixSecs;
}

/// A real-time clock which reads the system wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new [`SystemClock`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn timestamp_secs(&self) -> UnixSecs {
        Utc::now().timestamp()
    }
}

/// A static clock which only moves when told to.
///
/// Safe to share between threads; every reading observes the most recent `set_time`/`advance`.
#[derive(Debug, Default)]
pub struct TestClock {
    secs: AtomicI64,
}

impl TestClock {
    /// Creates a new [`TestClock`] instance starting at `secs`.
    #[must_use]
    pub const fn new(secs: UnixSecs) -> Self {
        Self {
            secs: AtomicI64::new(secs),
        }
    }

    /// Sets the clock to `secs`, which may move time backwards.
    pub fn set_time(&self, secs: UnixSecs) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    /// Advances the clock by `delta_secs` and returns the new time.
    pub fn advance(&self, delta_secs: i64) -> UnixSecs {
        self.secs.fetch_add(delta_secs, Ordering::SeqCst) + delta_secs
    }
}

impl Clock for TestClock {
    fn timestamp_secs(&self) -> UnixSecs {
        self.secs.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock::new().timestamp_secs() > 1_577_836_800);
    }

    #[rstest]
    fn test_test_clock_default_is_epoch() {
        assert_eq!(TestClock::default().timestamp_secs(), 0);
    }

    #[rstest]
    fn test_test_clock_set_time() {
        let clock = TestClock::new(100);
        clock.set_time(42);
        assert_eq!(clock.timestamp_secs(), 42);
    }

    #[rstest]
    #[case(0, 10, 10)]
    #[case(1_000, 60, 1_060)]
    #[case(1_000, -5, 995)]
    fn test_test_clock_advance(#[case] start: i64, #[case] delta: i64, #[case] expected: i64) {
        let clock = TestClock::new(start);
        assert_eq!(clock.advance(delta), expected);
        assert_eq!(clock.timestamp_secs(), expected);
    }

    #[rstest]
    fn test_clock_as_trait_object() {
        let clock = Arc::new(TestClock::new(7));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        clock.advance(3);
        assert_eq!(dyn_clock.timestamp_secs(), 10);
    }
}
