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

//! Conversions between UNIX seconds and calendar time.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::time::UnixSecs;

/// Converts a UNIX seconds timestamp to a UTC [`DateTime`].
///
/// Returns `None` if `secs` is outside the range chrono can represent.
#[must_use]
pub fn unix_secs_to_datetime(secs: UnixSecs) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Converts a UNIX seconds timestamp to an ISO 8601 (RFC 3339) string.
///
/// Out of range values are rendered as the raw integer.
#[must_use]
pub fn unix_secs_to_iso8601(secs: UnixSecs) -> String {
    match unix_secs_to_datetime(secs) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => secs.to_string(),
    }
}
