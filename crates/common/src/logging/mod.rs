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

//! The logging backend for node components.
//!
//! Components log through the [`log`] facade macros. This module installs the process-wide
//! [`Logger`] that filters records per target and writes them to stdout and stderr. Libraries
//! never install a logger on their own; binaries call [`init_logging`] or
//! [`ensure_logging_initialized`] once at startup.

pub mod config;
pub mod logger;

use std::{
    env,
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

pub use self::{
    config::{LOG_ENV_VAR, LoggerConfig},
    logger::{LogLine, Logger},
};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);
static LAZY_INIT: OnceLock<bool> = OnceLock::new();

/// Returns whether the node logger is installed.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::Relaxed)
}

/// Installs the node logger with the given configuration.
///
/// # Errors
///
/// Returns an error if a logger is already installed.
pub fn init_logging(config: LoggerConfig) -> anyhow::Result<()> {
    Logger::init_with_config(config)
}

/// Ensures logging is initialized on first use.
///
/// If `NODEKIT_LOG` is set and valid, initializes the logger with the specified config.
/// Otherwise, initializes with INFO level to stdout.
///
/// Returns `true` if logging is available (either already initialized or
/// successfully lazy-initialized), `false` otherwise.
pub fn ensure_logging_initialized() -> bool {
    if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
        return true;
    }

    LAZY_INIT.get_or_init(|| {
        let config = env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|spec| LoggerConfig::from_spec(&spec).ok())
            .unwrap_or_default();

        Logger::init_with_config(config).is_ok()
    });

    LOGGING_INITIALIZED.load(Ordering::SeqCst)
}
