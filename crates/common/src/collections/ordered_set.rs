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

//! A unique-item set iterated in ascending comparator order with positional access.

use std::{
    cmp::Ordering,
    fmt::{Debug, Formatter},
    hash::Hash,
};

use ahash::AHashSet;

use super::{Comparator, insertion_point, position_of};

/// A set of unique items kept sorted **ascending** under a bound three-way comparator.
///
/// Uniqueness is decided by [`Eq`]/[`Hash`], not by the comparator: distinct items that compare
/// [`Ordering::Equal`] may coexist and keep their insertion order relative to each other.
///
/// Positions are signed so that callers can pass any index, including negative ones, and get an
/// empty or `false` result rather than a panic.
///
/// Not internally synchronized; see the [module docs](super) for the sharing contract.
///
/// # Examples
///
/// ```
/// use nodekit_common::collections::OrderedSet;
///
/// let mut set = OrderedSet::new(|a: &i32, b: &i32| a.cmp(b));
/// assert!(set.add_item(30));
/// assert!(set.add_item(10));
/// assert!(!set.add_item(30));
///
/// assert_eq!(set.begin(), Some(&10));
/// assert_eq!(set.get_item_index(&30), Some(1));
/// assert!(set.del_item_by_index(0));
/// assert_eq!(set.items(), &[30]);
/// ```
pub struct OrderedSet<T> {
    cmp: Comparator<T>,
    index: AHashSet<T>,
    items: Vec<T>,
}

impl<T> OrderedSet<T>
where
    T: Clone + Eq + Hash,
{
    /// Creates a new empty [`OrderedSet`] bound to the three-way comparator `cmp`.
    #[must_use]
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            cmp: Box::new(cmp),
            index: AHashSet::new(),
            items: Vec::new(),
        }
    }

    /// Creates a new empty [`OrderedSet`] from a strict "less than" predicate.
    ///
    /// Items for which neither `less(a, b)` nor `less(b, a)` holds are treated as tied.
    #[must_use]
    pub fn with_less<F>(less: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    // Converts a signed position into a valid index for the current contents.
    fn checked_index(&self, index: isize) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.items.len())
    }

    /// Inserts `item` unless an equal item is already present.
    ///
    /// Returns whether the item was inserted.
    pub fn add_item(&mut self, item: T) -> bool {
        if self.index.contains(&item) {
            return false;
        }

        let position = insertion_point(&self.items, &item, &self.cmp);
        self.items.insert(position, item.clone());
        self.index.insert(item);
        true
    }

    /// Removes `item`, returning whether it was present.
    pub fn del_item(&mut self, item: &T) -> bool {
        if !self.index.remove(item) {
            return false;
        }

        if let Some(position) = position_of(&self.items, item, &self.cmp) {
            self.items.remove(position);
        }
        true
    }

    /// Removes the item at `index` in the current order.
    ///
    /// Returns `false` and leaves the set unchanged if `index` is negative or not less than
    /// [`size`](Self::size).
    pub fn del_item_by_index(&mut self, index: isize) -> bool {
        let Some(index) = self.checked_index(index) else {
            return false;
        };

        let item = self.items.remove(index);
        self.index.remove(&item);
        true
    }

    /// Returns the item at `index` in the current order, or `None` when out of range.
    #[must_use]
    pub fn get_item_by_index(&self, index: isize) -> Option<&T> {
        self.checked_index(index).map(|index| &self.items[index])
    }

    /// Returns the position of `item` in the current order, or `None` if absent.
    ///
    /// The position is exact even when the comparator ties distinct items or is inconsistent.
    #[must_use]
    pub fn get_item_index(&self, item: &T) -> Option<usize> {
        if !self.index.contains(item) {
            return None;
        }
        position_of(&self.items, item, &self.cmp)
    }

    /// Returns whether `item` is present.
    #[must_use]
    pub fn has_item(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    /// Returns the number of items.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the first item in order.
    #[must_use]
    pub fn begin(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns the last item in order.
    #[must_use]
    pub fn end(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the items in their current order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Removes all items, keeping the bound comparator.
    pub fn clear(&mut self) {
        self.index.clear();
        self.items.clear();
    }
}

impl<T: Debug> Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(OrderedSet))
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
