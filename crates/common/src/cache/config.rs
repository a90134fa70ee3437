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

//! Configuration for bounded object caches.

use nodekit_core::correctness::{check_positive_u64, check_positive_usize, check_predicate_true};
use serde::{Deserialize, Serialize};

/// The default number of entries held by a cache built from [`LruCacheConfig::default`].
pub const DEFAULT_LRU_CAPACITY: usize = 10_000;

/// Configuration for an [`LruCache`](super::LruCache).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LruCacheConfig {
    /// The maximum number of entries held before evicting.
    pub capacity: usize,
}

impl Default for LruCacheConfig {
    /// Creates a new default [`LruCacheConfig`] instance.
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LRU_CAPACITY,
        }
    }
}

impl LruCacheConfig {
    /// Creates a new [`LruCacheConfig`] instance.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Derives a capacity from a memory budget and the approximate size of one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if either size is zero or the budget cannot hold a single entry.
    pub fn from_memory_budget(budget_bytes: u64, entry_size_bytes: u64) -> anyhow::Result<Self> {
        check_positive_u64(budget_bytes, "budget_bytes")?;
        check_positive_u64(entry_size_bytes, "entry_size_bytes")?;
        check_predicate_true(
            entry_size_bytes <= budget_bytes,
            "memory budget is smaller than a single cache entry",
        )?;

        let capacity = usize::try_from(budget_bytes / entry_size_bytes).unwrap_or(usize::MAX);
        Ok(Self::new(capacity))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_positive_usize(self.capacity, "capacity")
    }
}
