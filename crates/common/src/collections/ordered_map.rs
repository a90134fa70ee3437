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

//! A key-value map iterated in descending comparator order.

use std::{
    cmp::Ordering,
    fmt::{Debug, Formatter},
    hash::Hash,
};

use ahash::AHashMap;

use super::{Comparator, insertion_point, position_of};

/// A key-value map whose keys are always held sorted **descending** under a bound comparator.
///
/// Key `a` sorts before key `b` when `cmp(a, b)` is [`Ordering::Greater`], so with a natural
/// ascending comparator the largest key comes [`first`](Self::first). Keys that compare equal
/// keep their insertion order.
///
/// Not internally synchronized; see the [module docs](super) for the sharing contract.
///
/// # Examples
///
/// ```
/// use nodekit_common::collections::OrderedMap;
///
/// let mut map = OrderedMap::new(|a: &u64, b: &u64| a.cmp(b));
/// map.add(5, "five");
/// map.add(1, "one");
/// map.add(3, "three");
/// assert_eq!(map.keys(), &[5, 3, 1]);
/// assert_eq!(map.first(), Some(&"five"));
/// assert_eq!(map.last(), Some(&"one"));
///
/// map.del(&3);
/// assert_eq!(map.keys(), &[5, 1]);
/// ```
pub struct OrderedMap<K, V> {
    cmp: Comparator<K>,
    entries: AHashMap<K, V>,
    keys: Vec<K>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new empty [`OrderedMap`] bound to the three-way comparator `cmp`.
    #[must_use]
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        Self {
            cmp: Box::new(cmp),
            entries: AHashMap::new(),
            keys: Vec::new(),
        }
    }

    // Ascending order of the key sequence, i.e. the bound comparator reversed.
    fn order(&self) -> impl Fn(&K, &K) -> Ordering + '_ {
        move |a: &K, b: &K| (self.cmp)(b, a)
    }

    /// Inserts `value` under `key`, returning the previous value if the key was present.
    ///
    /// Overwriting an existing key keeps its position in the order.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }

        let index = insertion_point(&self.keys, &key, self.order());
        self.keys.insert(index, key.clone());
        self.entries.insert(key, value);
        None
    }

    /// Removes `key` and returns its value, or `None` if the key was not present.
    pub fn del(&mut self, key: &K) -> Option<V> {
        let value = self.entries.remove(key)?;
        if let Some(index) = position_of(&self.keys, key, self.order()) {
            self.keys.remove(index);
        }
        Some(value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the value of the highest ranked key, or `None` if the map is empty.
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.first_key_value().map(|(_, v)| v)
    }

    /// Returns the value of the lowest ranked key, or `None` if the map is empty.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.last_key_value().map(|(_, v)| v)
    }

    /// Returns the highest ranked entry.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let key = self.keys.first()?;
        self.entries.get(key).map(|v| (key, v))
    }

    /// Returns the lowest ranked entry.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let key = self.keys.last()?;
        self.entries.get(key).map(|v| (key, v))
    }

    /// Returns the keys in their current order.
    ///
    /// The slice borrows the map, so it cannot be observed across a mutation.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Returns an owned copy of the keys in their current order.
    #[must_use]
    pub fn get_all_keys(&self) -> Vec<K> {
        self.keys.clone()
    }

    /// Returns an iterator over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.keys
            .iter()
            .filter_map(|key| self.entries.get(key).map(|v| (key, v)))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries, keeping the bound comparator.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }
}

impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(OrderedMap))
            .field("keys", &self.keys)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    use super::*;

    /// Mempool-style ranking key: fee rate, then earlier arrival, then txid.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct FeeRank {
        fee_rate: u64,
        sequence: u64,
        txid: [u8; 4],
    }

    impl FeeRank {
        fn new(fee_rate: u64, sequence: u64, id: u8) -> Self {
            Self {
                fee_rate,
                sequence,
                txid: [id; 4],
            }
        }
    }

    fn rank_cmp(a: &FeeRank, b: &FeeRank) -> Ordering {
        a.fee_rate
            .cmp(&b.fee_rate)
            .then_with(|| b.sequence.cmp(&a.sequence))
            .then_with(|| a.txid.cmp(&b.txid))
    }

    #[fixture]
    fn map() -> OrderedMap<u64, &'static str> {
        OrderedMap::new(|a: &u64, b: &u64| a.cmp(b))
    }

    #[rstest]
    fn test_empty_map(map: OrderedMap<u64, &'static str>) {
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
        assert_eq!(map.get(&1), None);
        assert!(map.keys().is_empty());
    }

    #[rstest]
    fn test_add_orders_descending(mut map: OrderedMap<u64, &'static str>) {
        map.add(5, "five");
        map.add(1, "one");
        map.add(3, "three");

        assert_eq!(map.get_all_keys(), vec![5, 3, 1]);
        assert_eq!(map.first(), Some(&"five"));
        assert_eq!(map.last(), Some(&"one"));
        assert_eq!(map.len(), 3);
    }

    #[rstest]
    fn test_del_keeps_order(mut map: OrderedMap<u64, &'static str>) {
        map.add(5, "five");
        map.add(1, "one");
        map.add(3, "three");

        assert_eq!(map.del(&3), Some("three"));
        assert_eq!(map.keys(), &[5, 1]);
        assert_eq!(map.get(&3), None);
    }

    #[rstest]
    fn test_del_missing_key_is_noop(mut map: OrderedMap<u64, &'static str>) {
        map.add(5, "five");
        assert_eq!(map.del(&42), None);
        assert_eq!(map.keys(), &[5]);
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_add_existing_key_overwrites_value(mut map: OrderedMap<u64, &'static str>) {
        map.add(5, "five");
        map.add(2, "two");
        let len_before = map.len();

        assert_eq!(map.add(5, "FIVE"), Some("five"));
        assert_eq!(map.len(), len_before);
        assert_eq!(map.get(&5), Some(&"FIVE"));
        assert_eq!(map.keys(), &[5, 2]);
    }

    #[rstest]
    fn test_del_last_entry_empties_extremes(mut map: OrderedMap<u64, &'static str>) {
        map.add(7, "seven");
        map.del(&7);
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
        assert!(map.is_empty());
    }

    #[rstest]
    fn test_iter_yields_entries_in_order(mut map: OrderedMap<u64, &'static str>) {
        map.add(2, "two");
        map.add(9, "nine");
        map.add(4, "four");

        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![(9, "nine"), (4, "four"), (2, "two")]);
    }

    #[rstest]
    fn test_clear(mut map: OrderedMap<u64, &'static str>) {
        map.add(1, "one");
        map.add(2, "two");
        map.clear();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());

        // Comparator survives the clear
        map.add(1, "one");
        map.add(3, "three");
        assert_eq!(map.keys(), &[3, 1]);
    }

    #[rstest]
    fn test_tied_keys_keep_insertion_order() {
        // Only the tens digit is ranked
        let mut map = OrderedMap::new(|a: &u32, b: &u32| (a / 10).cmp(&(b / 10)));
        map.add(31, ());
        map.add(12, ());
        map.add(35, ());
        map.add(38, ());

        assert_eq!(map.keys(), &[31, 35, 38, 12]);

        map.del(&35);
        assert_eq!(map.keys(), &[31, 38, 12]);
    }

    #[rstest]
    fn test_fee_ranking_first_and_last() {
        let mut map = OrderedMap::new(rank_cmp);
        map.add(FeeRank::new(10, 1, 0xaa), "a");
        map.add(FeeRank::new(50, 2, 0xbb), "b");
        map.add(FeeRank::new(50, 3, 0xcc), "c");
        map.add(FeeRank::new(1, 4, 0xdd), "d");

        // Highest fee first, earlier arrival wins the tie on fee
        assert_eq!(map.first(), Some(&"b"));
        assert_eq!(map.last(), Some(&"d"));

        map.del(&FeeRank::new(50, 2, 0xbb));
        assert_eq!(map.first(), Some(&"c"));
    }

    proptest! {
        #[rstest]
        fn prop_keys_always_sorted_descending(
            ops in proptest::collection::vec((any::<bool>(), 0..40u16), 0..200)
        ) {
            let mut map = OrderedMap::new(|a: &u16, b: &u16| a.cmp(b));
            let mut model = std::collections::BTreeMap::new();

            for (is_add, key) in ops {
                if is_add {
                    map.add(key, u32::from(key) * 2);
                    model.insert(key, u32::from(key) * 2);
                } else {
                    prop_assert_eq!(map.del(&key), model.remove(&key));
                }

                let expected: Vec<u16> = model.keys().rev().copied().collect();
                prop_assert_eq!(map.get_all_keys(), expected);
                prop_assert_eq!(map.len(), model.len());
            }
        }

        #[rstest]
        fn prop_first_and_last_match_extremes(keys in proptest::collection::vec(any::<i32>(), 1..50)) {
            let mut map = OrderedMap::new(|a: &i32, b: &i32| a.cmp(b));
            for key in &keys {
                map.add(*key, *key);
            }

            prop_assert_eq!(map.first(), keys.iter().max());
            prop_assert_eq!(map.last(), keys.iter().min());
        }

        #[rstest]
        fn prop_overwrite_is_idempotent_for_len(
            keys in proptest::collection::vec(0..20u8, 1..30),
            key in 0..20u8,
        ) {
            let mut map = OrderedMap::new(|a: &u8, b: &u8| a.cmp(b));
            for k in keys {
                map.add(k, 0u8);
            }
            map.add(key, 1);
            let len = map.len();

            map.add(key, 2);
            prop_assert_eq!(map.len(), len);
            prop_assert_eq!(map.get(&key), Some(&2));
            prop_assert_eq!(map.keys().iter().filter(|k| **k == key).count(), 1);
        }
    }
}
