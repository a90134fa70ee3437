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

use std::{
    fmt::Display,
    io::Write,
    sync::{Arc, atomic::Ordering},
};

use log::{Level, LevelFilter, Log, STATIC_MAX_LEVEL, set_boxed_logger, set_max_level};
use nodekit_core::{Clock, SystemClock, UnixSecs, datetime::unix_secs_to_iso8601};

use super::{LOGGING_INITIALIZED, config::LoggerConfig};

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";

/// A synchronous logger writing errors to stderr and everything else to stdout.
///
/// A logger is initialized with a [`LoggerConfig`] holding a default level and per-target
/// overrides. The longest matching target prefix decides the level for a record.
#[derive(Debug)]
pub struct Logger {
    /// Configuration for logging levels and behavior.
    pub config: LoggerConfig,
    /// Target overrides sorted by descending prefix length.
    module_filters: Vec<(String, LevelFilter)>,
    clock: Arc<dyn Clock>,
}

/// Represents a log event which includes a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    /// The timestamp for the event.
    pub timestamp: UnixSecs,
    /// The log level for the event.
    pub level: Level,
    /// The target the event originated from.
    pub target: String,
    /// The log message content.
    pub message: String,
}

impl LogLine {
    /// Returns the plain log line.
    #[must_use]
    pub fn to_plain(&self) -> String {
        format!(
            "{} [{}] {}: {}",
            unix_secs_to_iso8601(self.timestamp),
            self.level,
            self.target,
            self.message,
        )
    }

    /// Returns the log line with ANSI color codes.
    #[must_use]
    pub fn to_colored(&self) -> String {
        format!(
            "{ANSI_BOLD}{}{ANSI_RESET} {}[{}] {}: {}{ANSI_RESET}",
            unix_secs_to_iso8601(self.timestamp),
            level_color(self.level),
            self.level,
            self.target,
            self.message,
        )
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.message)
    }
}

const fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[1;31m",
        Level::Warn => "\x1b[1;33m",
        Level::Info => "",
        Level::Debug => "\x1b[94m",
        Level::Trace => "\x1b[90m",
    }
}

impl Logger {
    /// Creates a new [`Logger`] reading timestamps from the system clock.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Creates a new [`Logger`] reading timestamps from `clock`.
    #[must_use]
    pub fn with_clock(config: LoggerConfig, clock: Arc<dyn Clock>) -> Self {
        let mut module_filters: Vec<(String, LevelFilter)> = config
            .module_level
            .iter()
            .map(|(path, level)| (path.clone(), *level))
            .collect();
        module_filters.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            config,
            module_filters,
            clock,
        }
    }

    /// Returns the level filter applying to `target`.
    #[must_use]
    pub fn level_for(&self, target: &str) -> LevelFilter {
        self.module_filters
            .iter()
            .find(|(path, _)| target.starts_with(path.as_str()))
            .map_or(self.config.stdout_level, |(_, level)| *level)
    }

    /// Formats `line` according to the color setting.
    #[must_use]
    pub fn format(&self, line: &LogLine) -> String {
        if self.config.is_colored {
            line.to_colored()
        } else {
            line.to_plain()
        }
    }

    /// Initializes the logger based on the `NODEKIT_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the environment variable or parsing the configuration fails,
    /// or if a logger is already installed.
    pub fn init_with_env() -> anyhow::Result<()> {
        let config = LoggerConfig::from_env()?;
        Self::init_with_config(config)
    }

    /// Installs a logger with the given configuration as the process-wide logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger is already installed.
    pub fn init_with_config(config: LoggerConfig) -> anyhow::Result<()> {
        if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
            anyhow::bail!("Logging already initialized");
        }

        if config.print_config {
            println!("STATIC_MAX_LEVEL={STATIC_MAX_LEVEL}");
            println!("Logger initialized with {config:?}");
        }

        let max_level = config.max_level();
        set_boxed_logger(Box::new(Self::new(config)))?;
        set_max_level(max_level);

        LOGGING_INITIALIZED.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine {
            timestamp: self.clock.timestamp_secs(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        let formatted = self.format(&line);

        // Write failures are dropped
        let _ = if line.level == Level::Error {
            writeln!(std::io::stderr().lock(), "{formatted}")
        } else {
            writeln!(std::io::stdout().lock(), "{formatted}")
        };
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use log::Metadata;
    use nodekit_core::TestClock;
    use rstest::rstest;

    use super::*;

    fn line(level: Level) -> LogLine {
        LogLine {
            timestamp: 1_700_000_000,
            level,
            target: "nodekit_common::cache::lru".to_string(),
            message: "Evicted least recently used entry".to_string(),
        }
    }

    fn metadata(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[rstest]
    fn test_log_line_plain() {
        assert_eq!(
            line(Level::Info).to_plain(),
            "2023-11-14T22:13:20Z [INFO] nodekit_common::cache::lru: Evicted least recently used entry"
        );
    }

    #[rstest]
    fn test_log_line_colored() {
        assert_eq!(
            line(Level::Warn).to_colored(),
            "\x1b[1m2023-11-14T22:13:20Z\x1b[0m \x1b[1;33m[WARN] nodekit_common::cache::lru: Evicted least recently used entry\x1b[0m"
        );
    }

    #[rstest]
    fn test_log_line_display() {
        assert_eq!(
            line(Level::Error).to_string(),
            "[ERROR] nodekit_common::cache::lru: Evicted least recently used entry"
        );
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_format_follows_color_setting(#[case] is_colored: bool) {
        let config = LoggerConfig {
            is_colored,
            ..LoggerConfig::default()
        };
        let logger = Logger::with_clock(config, Arc::new(TestClock::new(0)));
        let formatted = logger.format(&line(Level::Info));

        assert_eq!(formatted.contains(ANSI_RESET), is_colored);
    }

    #[rstest]
    fn test_no_overrides_uses_stdout_level() {
        let logger = Logger::new(LoggerConfig::default());

        assert!(logger.enabled(&metadata(Level::Info, "nodekit_common::score")));
        assert!(logger.enabled(&metadata(Level::Error, "nodekit_common::score")));
        assert!(!logger.enabled(&metadata(Level::Debug, "nodekit_common::score")));
    }

    #[rstest]
    fn test_module_prefix_match() {
        let config = LoggerConfig::from_spec("stdout=Info;nodekit_common::cache=Trace").unwrap();
        let logger = Logger::new(config);

        assert!(logger.enabled(&metadata(Level::Trace, "nodekit_common::cache")));
        assert!(logger.enabled(&metadata(Level::Trace, "nodekit_common::cache::lru")));
        assert!(!logger.enabled(&metadata(Level::Trace, "nodekit_common::score")));
    }

    #[rstest]
    fn test_longest_prefix_wins() {
        let config =
            LoggerConfig::from_spec("nodekit_common=Error;nodekit_common::collections=Debug")
                .unwrap();
        let logger = Logger::new(config);

        assert_eq!(
            logger.level_for("nodekit_common::collections::ordered_set"),
            LevelFilter::Debug
        );
        assert_eq!(
            logger.level_for("nodekit_common::cache::lru"),
            LevelFilter::Error
        );
        assert_eq!(logger.level_for("other_crate"), LevelFilter::Info);
    }

    #[rstest]
    fn test_override_can_silence_target() {
        let config = LoggerConfig::from_spec("stdout=Trace;nodekit_common::cache=Off").unwrap();
        let logger = Logger::new(config);

        assert!(!logger.enabled(&metadata(Level::Error, "nodekit_common::cache::lru")));
        assert!(logger.enabled(&metadata(Level::Trace, "nodekit_common::score")));
    }
}
