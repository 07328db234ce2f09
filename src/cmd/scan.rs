// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan command implementation for clustergit-rs.

use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, GitError, Result};
use crate::git::discovery::candidates;
use crate::git::runner::{CommandRunner, SystemRunner};
use crate::report::{ConsoleSink, OutputSink, Palette, ReportOptions, Reporter};
use crate::scan::{ScanOptions, ScanTally, Scanner};

/// Main handler: scan `scan.directory` and report to stdout.
///
/// # Errors
///
/// Returns an error if the directory is missing, git is not installed, no
/// repository is found, the exec command fails, or the scan is interrupted.
pub async fn run_scan_command(config: &Config, cancel: CancellationToken) -> Result<ScanTally> {
    let root = config.scan.directory.as_path();
    if !root.is_dir() {
        return Err(ConfigError::InvalidValue {
            key: "scan.directory".to_string(),
            message: format!("'{}' is not a directory", root.display()),
        }
        .into());
    }

    let palette = Palette::new(config.output.colors);
    let mut reporter = Reporter::new(ConsoleSink::stdout(palette), report_options(config, root));
    let runner = SystemRunner::locate()?;
    debug!(git = %runner.git_path().display(), "using git");

    run_scan(config, &runner, &mut reporter, cancel).await
}

/// Scan with an explicit runner and reporter.
///
/// # Errors
///
/// See [`run_scan_command`].
pub async fn run_scan<R: CommandRunner, S: OutputSink>(
    config: &Config,
    runner: &R,
    reporter: &mut Reporter<S>,
    cancel: CancellationToken,
) -> Result<ScanTally> {
    let root = config.scan.directory.as_path();

    if config.output.clear {
        reporter.clear()?;
    }
    reporter.banner(root)?;

    let discovery = config.discovery_options()?;
    let options = scan_options(config);
    info!(root = %root.display(), recursive = discovery.recursive, "scanning");

    let tally = Scanner::new(runner, reporter, &options, cancel)
        .scan(candidates(root, &discovery))
        .await?;

    if !tally.any_repository_found {
        return Err(GitError::NoRepositories {
            root: root.display().to_string(),
        }
        .into());
    }

    reporter.finish(&tally)?;
    Ok(tally)
}

/// Reporter settings derived from `[output]`.
#[must_use]
pub fn report_options(config: &Config, root: &Path) -> ReportOptions {
    ReportOptions {
        align: config.output.align,
        hide_clean: config.output.hide_clean,
        count_only: config.output.count_dirty,
        quiet: config.output.quiet,
        relative_to: config.output.relative.then(|| root.to_path_buf()),
    }
}

/// Scanner settings derived from `[scan]` and `[actions]`.
#[must_use]
pub fn scan_options(config: &Config) -> ScanOptions {
    ScanOptions {
        expected_branch: config.expected_branch().map(str::to_string),
        skip_symlinks: config.scan.skip_symlinks,
        warn_unversioned: config.scan.warn_unversioned,
        plan: config.operation_plan(),
    }
}
