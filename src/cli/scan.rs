// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan, action and output flags.
//!
//! Each flag maps onto one configuration key. Switches only override the
//! configuration when given, so a `true` from a config file survives a
//! command line that does not mention it.

use clap::Args;
use std::path::PathBuf;

/// Flags controlling what is scanned, what is run and how it is shown.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Directory whose sub directories are scanned.
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Show debug logging on stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Width of the path column.
    #[arg(short = 'a', long = "align", value_name = "WIDTH")]
    pub align: Option<u16>,

    /// Remote and branch for push, pull and fetch, as `remote:branch`.
    #[arg(short = 'r', long = "remote", value_name = "REMOTE")]
    pub remote: Option<String>,

    /// Push repositories that are ahead and have a clean tree.
    #[arg(long)]
    pub push: bool,

    /// Pull repositories that are clean and on the expected branch.
    #[arg(short = 'p', long)]
    pub pull: bool,

    /// Fetch all remotes and prune.
    #[arg(short = 'f', long)]
    pub fetch: bool,

    /// Shell command to run in every repository; a failure stops the scan.
    #[arg(long = "exec", value_name = "COMMAND")]
    pub exec: Option<String>,

    /// Clear the screen before scanning.
    #[arg(short = 'c', long)]
    pub clear: bool,

    /// Print only the number of dirty repositories.
    #[arg(short = 'C', long = "count-dirty")]
    pub count_dirty: bool,

    /// No banner and no completion line.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Do not show clean repositories.
    #[arg(short = 'H', long = "hide-clean")]
    pub hide_clean: bool,

    /// Show paths relative to the scanned directory.
    #[arg(short = 'R', long)]
    pub relative: bool,

    /// Disable colored output.
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Expected branch; an empty value disables the check.
    #[arg(short = 'b', long = "branch", value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Descend into sub directories that are not repositories.
    #[arg(long)]
    pub recursive: bool,

    /// Neither scan nor follow symbolic links.
    #[arg(long = "skip-symlinks")]
    pub skip_symlinks: bool,

    /// Skip paths matching this regex. Can be specified multiple times.
    #[arg(short = 'e', long = "exclude", value_name = "REGEX", action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Check out this branch in every repository.
    #[arg(short = 'B', long = "checkout", value_name = "BRANCH")]
    pub checkout: Option<String>,

    /// Warn about directories that are not repositories.
    #[arg(short = 'U', long = "warn-unversioned")]
    pub warn_unversioned: bool,
}

impl ScanArgs {
    /// Converts the flags that were given to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides: Vec<(&'static str, config::Value)> = Vec::new();

        if let Some(ref directory) = self.directory {
            overrides.push(("scan.directory", directory.display().to_string().into()));
        }
        if let Some(ref branch) = self.branch {
            overrides.push(("scan.branch", branch.clone().into()));
        }
        if !self.exclude.is_empty() {
            overrides.push(("scan.exclude", self.exclude.clone().into()));
        }
        if let Some(ref remote) = self.remote {
            overrides.push(("actions.remote", remote.clone().into()));
        }
        if let Some(ref command) = self.exec {
            overrides.push(("actions.exec", command.clone().into()));
        }
        if let Some(ref branch) = self.checkout {
            overrides.push(("actions.checkout", branch.clone().into()));
        }
        if let Some(align) = self.align {
            overrides.push(("output.align", i64::from(align).into()));
        }
        if self.no_color {
            overrides.push(("output.colors", false.into()));
        }

        let switches = [
            ("scan.recursive", self.recursive),
            ("scan.skip_symlinks", self.skip_symlinks),
            ("scan.warn_unversioned", self.warn_unversioned),
            ("actions.push", self.push),
            ("actions.pull", self.pull),
            ("actions.fetch", self.fetch),
            ("output.clear", self.clear),
            ("output.count_dirty", self.count_dirty),
            ("output.quiet", self.quiet),
            ("output.hide_clean", self.hide_clean),
            ("output.relative", self.relative),
            ("output.verbose", self.verbose),
        ];
        overrides.extend(
            switches
                .into_iter()
                .filter(|&(_, on)| on)
                .map(|(key, _)| (key, true.into())),
        );

        overrides
    }
}
