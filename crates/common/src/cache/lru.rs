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

//! A thread-safe, fixed-capacity cache with least-recently-used eviction.

use std::{
    fmt::{Debug, Formatter},
    hash::Hash,
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard},
};

use ahash::RandomState;

use super::config::LruCacheConfig;

/// Errors returned by [`LruCache`] operations.
///
/// Lookups that miss are not errors; these variants signal a misconfigured or unusable cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LruCacheError {
    /// The requested capacity was zero.
    #[error("invalid LRU cache capacity {0}, must be positive")]
    InvalidCapacity(usize),
    /// The internal storage lock was poisoned by a panicking holder.
    #[error("LRU cache storage unavailable, lock poisoned")]
    Poisoned,
}

type LruState<K, V> = lru::LruCache<K, V, RandomState>;

/// A fixed-capacity key-value cache evicting the least recently used entry.
///
/// Both [`add`](Self::add) and [`get`](Self::get) mark the touched entry as most recently used;
/// [`peek`](Self::peek) reads without changing recency. Inserting a new key into a full cache
/// evicts exactly one entry, the least recently used.
///
/// # Thread safety
///
/// Every operation takes an exclusive lock on the cache for its full duration, so a single
/// instance can be shared between threads (e.g. behind an `Arc`). If a thread panics while
/// holding the lock the storage is considered unusable and every later operation returns
/// [`LruCacheError::Poisoned`].
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use nodekit_common::cache::LruCache;
///
/// let cache = LruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.add("a", 1).unwrap();
/// cache.add("b", 2).unwrap();
/// cache.get(&"a").unwrap(); // "a" becomes most recently used
/// cache.add("c", 3).unwrap(); // "b" is evicted
///
/// assert_eq!(cache.get(&"b").unwrap(), None);
/// assert_eq!(cache.get(&"a").unwrap(), Some(1));
/// assert_eq!(cache.get(&"c").unwrap(), Some(3));
/// ```
pub struct LruCache<K, V> {
    capacity: NonZeroUsize,
    state: Mutex<LruState<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new empty [`LruCache`] holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            state: Mutex::new(lru::LruCache::with_hasher(capacity, RandomState::new())),
        }
    }

    /// Creates a new empty [`LruCache`] from a plain capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, LruCacheError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(LruCacheError::InvalidCapacity(capacity))
    }

    /// Creates a new empty [`LruCache`] from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::InvalidCapacity`] if the configuration fails validation.
    pub fn from_config(config: &LruCacheConfig) -> Result<Self, LruCacheError> {
        config
            .validate()
            .map_err(|_| LruCacheError::InvalidCapacity(config.capacity))?;
        Self::try_new(config.capacity)
    }

    fn lock(&self) -> Result<MutexGuard<'_, LruState<K, V>>, LruCacheError> {
        self.state.lock().map_err(|_| LruCacheError::Poisoned)
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Inserts or updates `key` and marks it most recently used.
    ///
    /// Updating an existing key never evicts. Returns the evicted entry when inserting a new
    /// key pushed the cache over capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn add(&self, key: K, value: V) -> Result<Option<(K, V)>, LruCacheError> {
        let mut state = self.lock()?;

        // `push` hands back the replaced entry on update, which is not an eviction
        if state.contains(&key) {
            state.put(key, value);
            return Ok(None);
        }

        let evicted = state.push(key, value);
        if evicted.is_some() {
            log::trace!(
                "Evicted least recently used entry, capacity={}",
                self.capacity
            );
        }
        Ok(evicted)
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn get(&self, key: &K) -> Result<Option<V>, LruCacheError>
    where
        V: Clone,
    {
        Ok(self.lock()?.get(key).cloned())
    }

    /// Returns a clone of the value for `key` without changing its recency.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn peek(&self, key: &K) -> Result<Option<V>, LruCacheError>
    where
        V: Clone,
    {
        Ok(self.lock()?.peek(key).cloned())
    }

    /// Returns whether `key` is cached, without changing its recency.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn contains(&self, key: &K) -> Result<bool, LruCacheError> {
        Ok(self.lock()?.contains(key))
    }

    /// Removes `key`, returning whether it was cached.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn remove(&self, key: &K) -> Result<bool, LruCacheError> {
        Ok(self.lock()?.pop(key).is_some())
    }

    /// Returns the number of cached entries.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn size(&self) -> Result<usize, LruCacheError> {
        Ok(self.lock()?.len())
    }

    /// Returns whether the cache holds no entries.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn is_empty(&self) -> Result<bool, LruCacheError> {
        Ok(self.lock()?.is_empty())
    }

    /// Returns the cached keys from most to least recently used.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn keys(&self) -> Result<Vec<K>, LruCacheError> {
        Ok(self.lock()?.iter().map(|(key, _)| key.clone()).collect())
    }

    /// Removes all entries.
    ///
    /// # Errors
    ///
    /// Returns [`LruCacheError::Poisoned`] if the cache storage is unusable.
    pub fn clear(&self) -> Result<(), LruCacheError> {
        self.lock()?.clear();
        Ok(())
    }
}

impl<K, V> Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(LruCache))
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
