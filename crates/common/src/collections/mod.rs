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

//! Containers kept sorted under a caller-supplied comparator.
//!
//! Both containers hold their elements in a contiguous sorted sequence alongside a hash index,
//! so membership is O(1), positional and extremal reads are O(1), and a mutation costs one
//! binary search plus an element shift.
//!
//! # Thread safety
//!
//! Neither [`OrderedMap`] nor [`OrderedSet`] synchronizes internally. They are `Send` and `Sync`
//! when their payloads are, and callers sharing an instance between threads must serialize
//! access themselves (for example by holding the mempool lock around every call).

pub mod ordered_map;
pub mod ordered_set;

use std::cmp::Ordering;

pub use self::{ordered_map::OrderedMap, ordered_set::OrderedSet};

/// A three-way comparator bound to a container at construction.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Returns the index at which `item` is inserted into `items`, which is sorted ascending
/// under `order`. Elements comparing equal to `item` stay in front of it.
pub(crate) fn insertion_point<T>(
    items: &[T],
    item: &T,
    order: impl Fn(&T, &T) -> Ordering,
) -> usize {
    items.partition_point(|x| order(x, item) != Ordering::Greater)
}

/// Returns the position of an element known to be present in `items`.
///
/// The binary search narrows to the run of elements comparing equal to `item` and matches by
/// equality inside it. An inconsistent comparator can place the element outside that run, in
/// which case the whole sequence is scanned.
pub(crate) fn position_of<T: PartialEq>(
    items: &[T],
    item: &T,
    order: impl Fn(&T, &T) -> Ordering,
) -> Option<usize> {
    let lo = items.partition_point(|x| order(x, item) == Ordering::Less);
    let run = items[lo..].partition_point(|x| order(x, item) == Ordering::Equal);

    if let Some(offset) = items[lo..lo + run].iter().position(|x| x == item) {
        return Some(lo + offset);
    }

    let found = items.iter().position(|x| x == item);
    if found.is_some() {
        log::warn!("Comparator is not a strict weak order, fell back to a linear scan");
    }
    found
}
