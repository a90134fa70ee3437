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

//! A misbehavior score combining a persistent count with an exponentially decaying count.
//!
//! The observed score at time `t` is `persistent + transient * decay_factor(t - last_update)`,
//! where the decay factor halves every [`HALF_LIFE_SECS`] and the transient part is treated as
//! fully decayed once [`LIFE_TIME_SECS`] have elapsed.

use std::{
    fmt::Display,
    sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError},
};

use nodekit_core::{Clock, SystemClock, UnixSecs, datetime::unix_secs_to_iso8601};

/// Seconds for the transient part of a score to decay to half its value.
pub const HALF_LIFE_SECS: i64 = 60;

/// Seconds after which the transient part of a score no longer counts.
pub const LIFE_TIME_SECS: i64 = 1_800;

/// Number of whole-second decay factors computed once per process.
pub const PRECOMPUTED_LEN: usize = 64;

const LAMBDA: f64 = std::f64::consts::LN_2 / HALF_LIFE_SECS as f64;

static PRECOMPUTED_FACTORS: LazyLock<[f64; PRECOMPUTED_LEN]> =
    LazyLock::new(|| std::array::from_fn(|i| (-LAMBDA * i as f64).exp()));

/// Returns the decay factor `exp(-ln(2) / HALF_LIFE_SECS * elapsed_secs)`.
///
/// Factors for elapsed times below [`PRECOMPUTED_LEN`] seconds come from a table built on first
/// use; longer times are computed directly. The result lies in (0, 1] for non-negative input.
#[must_use]
pub fn decay_factor(elapsed_secs: i64) -> f64 {
    match usize::try_from(elapsed_secs) {
        Ok(i) if i < PRECOMPUTED_LEN => PRECOMPUTED_FACTORS[i],
        _ => (-LAMBDA * elapsed_secs as f64).exp(),
    }
}

/// How [`DecayScore::increase`] folds a transient delta into the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccumulationPolicy {
    /// A transient delta is only added when the current transient part is above 1 and time
    /// has moved forward since the last update.
    ///
    /// A stale transient part (older than [`LIFE_TIME_SECS`]) is zeroed without adding the
    /// delta, so a score starting from zero never accumulates a transient part.
    #[default]
    Gated,
    /// The transient part is decayed to the present before every delta is added.
    ///
    /// A stale transient part is zeroed without adding the delta. When no transient part is
    /// left the delta opens a new window.
    Decaying,
}

/// The raw state of a [`DecayScore`] at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecayScoreSnapshot {
    /// Never decays, only grows.
    pub persistent: u32,
    /// Decays from `last_update` onwards.
    pub transient: f64,
    /// UNIX seconds of the last transient update.
    pub last_update: UnixSecs,
}

impl DecayScoreSnapshot {
    /// Returns the score as observed at `now`.
    #[must_use]
    pub fn score_at(&self, now: UnixSecs) -> u32 {
        let dt = now.saturating_sub(self.last_update);
        if self.transient < 1.0 || !(0..=LIFE_TIME_SECS).contains(&dt) {
            return self.persistent;
        }
        self.persistent
            .saturating_add(round_to_u32(self.transient * decay_factor(dt)))
    }

    fn increase(
        &mut self,
        persistent: u32,
        transient: u32,
        now: UnixSecs,
        policy: AccumulationPolicy,
    ) -> u32 {
        self.persistent = self.persistent.saturating_add(persistent);

        if transient > 0 {
            let dt = now.saturating_sub(self.last_update);

            if dt > LIFE_TIME_SECS {
                if self.transient > 0.0 {
                    log::debug!(
                        "Stale transient score {} reset after {dt}s",
                        self.transient
                    );
                    self.transient = 0.0;
                } else if policy == AccumulationPolicy::Decaying {
                    // Nothing left to reset, so a new window starts here
                    self.transient = f64::from(transient);
                    self.last_update = now;
                }
            } else {
                let accumulate = self.transient > 1.0 && dt > 0;
                match policy {
                    AccumulationPolicy::Gated if accumulate => {
                        self.transient += f64::from(transient);
                        self.last_update = now;
                    }
                    AccumulationPolicy::Gated => {}
                    AccumulationPolicy::Decaying => {
                        if accumulate {
                            self.transient *= decay_factor(dt);
                        }
                        self.transient += f64::from(transient);
                        self.last_update = now;
                    }
                }
            }
        }

        self.persistent
            .saturating_add(round_to_u32(self.transient))
    }
}

fn round_to_u32(value: f64) -> u32 {
    // Float to int casts saturate, and NaN maps to zero
    value.round() as u32
}

/// A thread-safe misbehavior score with a persistent and a time-decaying part.
///
/// One instance is kept per peer. Protocol violations call [`increase`](Self::increase), ban
/// decisions read [`int`](Self::int), and a manual unban calls [`reset`](Self::reset).
///
/// Every operation holds an exclusive lock for its full duration. The state is plain data, so a
/// lock poisoned by a panicking holder is recovered rather than reported.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use nodekit_common::score::{AccumulationPolicy, DecayScore};
/// use nodekit_core::TestClock;
///
/// let clock = Arc::new(TestClock::new(1_700_000_000));
/// let score = DecayScore::new(clock.clone(), AccumulationPolicy::Decaying);
///
/// score.increase(0, 100);
/// clock.advance(60); // one half-life
/// assert_eq!(score.int(), 50);
/// ```
#[derive(Debug)]
pub struct DecayScore {
    clock: Arc<dyn Clock>,
    policy: AccumulationPolicy,
    state: Mutex<DecayScoreSnapshot>,
}

impl DecayScore {
    /// Creates a new zeroed [`DecayScore`] reading time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, policy: AccumulationPolicy) -> Self {
        Self::from_snapshot(clock, policy, DecayScoreSnapshot::default())
    }

    /// Creates a new [`DecayScore`] resuming from `snapshot`.
    #[must_use]
    pub fn from_snapshot(
        clock: Arc<dyn Clock>,
        policy: AccumulationPolicy,
        snapshot: DecayScoreSnapshot,
    ) -> Self {
        Self {
            clock,
            policy,
            state: Mutex::new(snapshot),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DecayScoreSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the accumulation policy.
    #[must_use]
    pub const fn policy(&self) -> AccumulationPolicy {
        self.policy
    }

    /// Adds `persistent` to the persistent part and folds `transient` into the decaying part.
    ///
    /// Returns `persistent + transient` without applying decay, as of this call.
    pub fn increase(&self, persistent: u32, transient: u32) -> u32 {
        let mut state = self.lock();
        let now = self.clock.timestamp_secs();
        state.increase(persistent, transient, now, self.policy)
    }

    /// Returns the current score, rounded to the nearest integer.
    ///
    /// Only the persistent part is returned when the transient part is below 1, the last update
    /// lies in the future, or it is older than [`LIFE_TIME_SECS`].
    #[must_use]
    pub fn int(&self) -> u32 {
        let state = self.lock();
        state.score_at(self.clock.timestamp_secs())
    }

    /// Zeroes the score.
    pub fn reset(&self) {
        *self.lock() = DecayScoreSnapshot::default();
    }

    /// Returns a copy of the raw state.
    #[must_use]
    pub fn snapshot(&self) -> DecayScoreSnapshot {
        *self.lock()
    }
}

impl Default for DecayScore {
    /// Creates a new zeroed [`DecayScore`] on the system clock with the default policy.
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()), AccumulationPolicy::default())
    }
}

impl Display for DecayScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        let now = self.clock.timestamp_secs();
        write!(
            f,
            "persistent {} + transient {} at {} = {} as of now",
            state.persistent,
            state.transient,
            unix_secs_to_iso8601(state.last_update),
            state.score_at(now),
        )
    }
}
