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

//! Logging configuration types and parsing.
//!
//! # Spec String Format
//!
//! The `NODEKIT_LOG` environment variable uses a semicolon-separated format:
//!
//! ```text
//! stdout=Info;nodekit_common::cache=Trace;is_colored=false
//! ```
//!
//! ## Supported Keys
//!
//! | Key            | Type      | Description                                      |
//! |----------------|-----------|--------------------------------------------------|
//! | `stdout`       | Log level | Maximum level for output without an override.    |
//! | `is_colored`   | Boolean   | Enable ANSI colors (default: true).              |
//! | `print_config` | Boolean   | Print config to stdout at startup.               |
//! | `<target>`     | Log level | Level override for a log target (prefix match).  |
//!
//! Log levels are case-insensitive: `Off`, `Error`, `Warn`, `Info`, `Debug`, `Trace`.
//!
//! Booleans may be given as a bare flag (`is_colored`) or explicitly (`is_colored=false`,
//! `is_colored=0`, `is_colored=no`).

use std::{env, str::FromStr};

use ahash::AHashMap;
use log::LevelFilter;

/// The environment variable read by [`LoggerConfig::from_env`].
pub const LOG_ENV_VAR: &str = "NODEKIT_LOG";

/// Configuration for the node logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum log level for targets without an override.
    pub stdout_level: LevelFilter,
    /// Per-target log level overrides (prefix match).
    pub module_level: AHashMap<String, LevelFilter>,
    /// Use ANSI color codes in output.
    pub is_colored: bool,
    /// Print configuration to stdout at startup.
    pub print_config: bool,
}

impl Default for LoggerConfig {
    /// Creates a new default [`LoggerConfig`] instance.
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            module_level: AHashMap::new(),
            is_colored: true,
            print_config: false,
        }
    }
}

impl LoggerConfig {
    /// Creates a new [`LoggerConfig`] instance.
    #[must_use]
    pub const fn new(
        stdout_level: LevelFilter,
        module_level: AHashMap<String, LevelFilter>,
        is_colored: bool,
        print_config: bool,
    ) -> Self {
        Self {
            stdout_level,
            module_level,
            is_colored,
            print_config,
        }
    }

    /// Parses a configuration from a spec string.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec string contains invalid syntax or log levels.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }

            let Some((k, v)) = kv.split_once('=') else {
                match kv.to_lowercase().as_str() {
                    "is_colored" => config.is_colored = true,
                    "print_config" => config.print_config = true,
                    _ => anyhow::bail!("Invalid spec pair: {kv}"),
                }
                continue;
            };

            let k = k.trim();
            let v = v.trim();

            match k.to_lowercase().as_str() {
                "is_colored" => config.is_colored = parse_bool_value(v),
                "print_config" => config.print_config = parse_bool_value(v),
                "stdout" => config.stdout_level = parse_level(v)?,
                _ => {
                    if k.is_empty() {
                        anyhow::bail!("Invalid spec pair: {kv}");
                    }
                    config.module_level.insert(k.to_string(), parse_level(v)?);
                }
            }
        }

        Ok(config)
    }

    /// Parses configuration from the `NODEKIT_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or contains invalid syntax.
    pub fn from_env() -> anyhow::Result<Self> {
        let spec = env::var(LOG_ENV_VAR)?;
        Self::from_spec(&spec)
    }

    /// Returns the most verbose level any target may log at.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        self.module_level
            .values()
            .copied()
            .fold(self.stdout_level, Ord::max)
    }
}

/// Parses a boolean value from a string.
///
/// Returns `true` unless the value is explicitly "false", "0", or "no" (case-insensitive).
fn parse_bool_value(v: &str) -> bool {
    !matches!(v.to_lowercase().as_str(), "false" | "0" | "no")
}

fn parse_level(v: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(v).map_err(|_| anyhow::anyhow!("Invalid log level: {v}"))
}
