// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostics for a scan.
//!
//! ```text
//! [log] section + --verbose + colors
//!        |
//!        v
//!   LogConfig::for_scan --> init_logging
//!                               |
//!                 +-------------+-------------+
//!                 v                           v
//!          stderr layer                 file layer (--log-file)
//!          console_level                file_level, span close events
//!                 |                           |
//!                 +------> LogGuard <---------+
//!                          flushes the file writer on drop
//!
//! level  0 silent  1 error  2 warn  3 info  4 debug  5 trace
//!                           default         --verbose
//! ```
//!
//! What each level adds for a scan:
//!
//! - info: the scan root and the final tally
//! - debug: every git and exec invocation with its directory, classified
//!   status per repository, skipped candidates
//! - trace: subprocess output line by line, process ids
//!
//! The report goes to stdout; log lines only ever go to stderr or the file.

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::types::LogSection;
use crate::error::{ConfigError, Result};

/// Verbosity 0-5, as written in `[log]` and passed to `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::WARN
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);

    /// Highest accepted value.
    pub const MAX: u8 = Self::TRACE.0;

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` above [`LogLevel::MAX`].
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        if level <= Self::MAX {
            Ok(Self(level))
        } else {
            Err(ConfigError::InvalidValue {
                key: "log level".to_string(),
                message: format!("must be 0-{}, got {level}", Self::MAX),
            })
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// `EnvFilter` directive for this level.
    #[must_use]
    pub const fn to_filter_string(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Settings for [`init_logging`].
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::WARN)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
    #[builder(setters(name = with_ansi), default = true)]
    ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    /// Logging for one run: the `[log]` section, with `verbose` raising the
    /// console to at least debug and `colors` deciding ANSI on stderr.
    #[must_use]
    pub fn for_scan(section: &LogSection, verbose: bool, colors: bool) -> Self {
        let console_level = if verbose {
            section.console_level.max(LogLevel::DEBUG)
        } else {
            section.console_level
        };

        Self::builder()
            .with_console_level(console_level)
            .with_file_level(section.file_level)
            .maybe_with_log_file(section.file.as_ref().map(|p| p.display().to_string()))
            .with_ansi(colors)
            .build()
    }

    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    /// Whether console log lines may carry ANSI colors.
    #[must_use]
    pub const fn ansi(&self) -> bool {
        self.ansi
    }
}

/// Keeps the file writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
///
/// # Example
///
/// ```no_run
/// use clustergit_rs::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::DEBUG)
///     .with_log_file("clustergit.log".to_string())
///     .build();
///
/// let _guard = init_logging(&config)?;
/// tracing::debug!("scan starting");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(config.ansi())
        .with_filter(EnvFilter::new(config.console_level().to_filter_string()));

    let (file_layer, file_guard) = if let Some(log_path) = config.log_file() {
        let log_path = Path::new(log_path);

        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::File::create(log_path)
            .with_context(|| format!("failed to create log file {}", log_path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        // Span close events time each repository's scan_repository span.
        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(config.file_level().to_filter_string()));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
