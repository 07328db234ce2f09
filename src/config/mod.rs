// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for clustergit-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. clustergit.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. CLUSTERGIT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CLUSTERGIT_SCAN__BRANCH=main           → scan.branch = "main"
//! CLUSTERGIT_SCAN__EXCLUDE=target,build  → scan.exclude = ["target", "build"]
//! CLUSTERGIT_OUTPUT__COLORS=false        → output.colors = false
//! ```
//!
//! # Example
//!
//! ```toml
//! [scan]
//! directory = "~/src"
//! branch = "main"
//! exclude = ["/archive/"]
//!
//! [actions]
//! remote = "origin:main"
//! fetch = true
//!
//! [output]
//! align = 60
//! hide_clean = true
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ClusterResult, Result};
use crate::git::discovery::DiscoveryOptions;
use crate::git::ops::OperationPlan;

use loader::ConfigLoader;
use types::{ActionsConfig, ExcludeSet, LogSection, OutputConfig, RemoteSpec, ScanConfig};

/// File picked up from the current directory when present.
pub const LOCAL_CONFIG_FILE: &str = "clustergit.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CLUSTERGIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub actions: ActionsConfig,
    pub output: OutputConfig,
    pub log: LogSection,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use clustergit_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("clustergit.toml")
    ///     .with_env_prefix("CLUSTERGIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an invalid exclude regex.
    pub fn validate(&self) -> ClusterResult<()> {
        self.exclude_set().map(|_| ())
    }

    /// Compile `scan.exclude`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid pattern.
    pub fn exclude_set(&self) -> ClusterResult<ExcludeSet> {
        ExcludeSet::new(&self.scan.exclude)
    }

    /// Walker settings derived from `[scan]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an invalid exclude regex.
    pub fn discovery_options(&self) -> ClusterResult<DiscoveryOptions> {
        Ok(DiscoveryOptions {
            recursive: self.scan.recursive,
            skip_symlinks: self.scan.skip_symlinks,
            exclude: self.exclude_set()?,
        })
    }

    /// Operations derived from `[actions]`.
    #[must_use]
    pub fn operation_plan(&self) -> OperationPlan {
        OperationPlan {
            push: self.actions.push,
            pull: self.actions.pull,
            fetch: self.actions.fetch,
            remote: RemoteSpec::parse(&self.actions.remote),
            exec: self.actions.exec.clone().filter(|c| !c.trim().is_empty()),
            checkout: self.actions.checkout.clone().filter(|b| !b.is_empty()),
            strip_colors: !self.output.colors,
        }
    }

    /// Expected branch, `None` when the check is disabled.
    #[must_use]
    pub fn expected_branch(&self) -> Option<&str> {
        Some(self.scan.branch.as_str()).filter(|b| !b.is_empty())
    }
}
