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

//! Ranking, eviction and decay-scoring primitives for a UTXO full node.
//!
//! - [`collections`]: Comparator-ordered map and set used for mempool and peer rankings.
//! - [`cache`]: A fixed-capacity, thread-safe LRU cache for hot objects.
//! - [`score`]: A misbehavior score with a persistent and an exponentially decaying part.
//! - [`logging`]: The process-wide logger behind the [`log`] facade.

#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]

pub mod cache;
pub mod collections;
pub mod logging;
pub mod score;
