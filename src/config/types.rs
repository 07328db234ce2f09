// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for clustergit-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config
//!   scan     ScanConfig     where to look, which branch is expected
//!   actions  ActionsConfig  push / pull / fetch / exec / checkout
//!   output   OutputConfig   alignment, colors, filters
//!   log      LogSection     console and file log levels
//! ```
//!
//! # Remote Spec
//!
//! ```text
//! "origin:main"  -> git push origin main
//! "origin"       -> git push origin
//! ":main"        -> git push main
//! ""             -> git push
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClusterResult, ConfigError};
use crate::logging::LogLevel;

/// Where and how to look for repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory whose children are scanned.
    pub directory: PathBuf,
    /// Expected branch; an empty string disables the check.
    pub branch: String,
    /// Descend into non-repository directories.
    pub recursive: bool,
    /// Neither scan nor follow symbolic links.
    pub skip_symlinks: bool,
    /// Regexes matched against the full candidate path.
    pub exclude: Vec<String>,
    /// Warn about directories that are not repositories.
    pub warn_unversioned: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            branch: "master".to_string(),
            recursive: false,
            skip_symlinks: false,
            exclude: Vec::new(),
            warn_unversioned: false,
        }
    }
}

/// Operations to run in every repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionsConfig {
    /// `remote:branch` passed to push, pull and fetch.
    pub remote: String,
    pub push: bool,
    pub pull: bool,
    pub fetch: bool,
    /// Shell command run in every repository.
    pub exec: Option<String>,
    /// Branch to check out in every repository.
    pub checkout: Option<String>,
}

/// Report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Width the repository path is padded to.
    pub align: usize,
    pub colors: bool,
    pub quiet: bool,
    pub hide_clean: bool,
    /// Print only the number of dirty repositories.
    pub count_dirty: bool,
    /// Show paths relative to the scan directory.
    pub relative: bool,
    /// Clear the terminal before the scan.
    pub clear: bool,
    /// Raise console logging to debug.
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            align: 40,
            colors: true,
            quiet: false,
            hide_clean: false,
            count_dirty: false,
            relative: false,
            clear: false,
            verbose: false,
        }
    }
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    /// Console log level (0-5).
    pub console_level: LogLevel,
    /// File log level (0-5).
    pub file_level: LogLevel,
    /// Optional log file.
    pub file: Option<PathBuf>,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            console_level: LogLevel::WARN,
            file_level: LogLevel::TRACE,
            file: None,
        }
    }
}

/// Remote and branch for push, pull and fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSpec {
    remote: String,
    branch: String,
}

impl RemoteSpec {
    /// Parse `remote[:branch]`. Missing parts are empty.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let (remote, branch) = spec.split_once(':').unwrap_or((spec, ""));
        Self {
            remote: remote.trim().to_string(),
            branch: branch.trim().to_string(),
        }
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Non-empty parts, in command-line order.
    pub fn args(&self) -> impl Iterator<Item = &str> {
        [self.remote.as_str(), self.branch.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
    }
}

/// Compiled exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Regex>,
}

impl ExcludeSet {
    /// Compile every pattern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first pattern that is
    /// not a valid regex.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ClusterResult<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    key: "scan.exclude".to_string(),
                    message: format!("'{pattern}' is not a valid regex: {e}"),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if any pattern matches somewhere in the path.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let text = path.to_string_lossy();
        self.patterns.iter().any(|re| re.is_match(&text))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
