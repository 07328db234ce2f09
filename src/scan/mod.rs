// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository scanner.
//!
//! ```text
//! for path in candidates:
//!   .clustergit-ignore present     skip
//!   symlink && skip_symlinks       skip
//!   .git present
//!     git status -> classify -> ops::execute -> reporter.repository
//!     tally.any_repository_found = true
//!     dirty_count += !clean
//!     exec failed                  stop, Err(CommandFailed)
//!   plain dir && warn_unversioned  reporter.unversioned
//!   cancelled                      stop, Err(Interrupted)
//! ```
//!
//! One repository and one subprocess at a time, in candidate order.


use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::error::{GitError, Result};
use crate::git::discovery::{has_ignore_marker, is_git_repo};
use crate::git::ops::{self, OperationOutcome, OperationPlan};
use crate::git::runner::CommandRunner;
use crate::git::status::{self, StatusReport};
use crate::report::{OutputSink, Reporter};

/// Running totals of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanTally {
    pub any_repository_found: bool,
    pub dirty_count: usize,
}

/// Everything learned about one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoResult {
    pub path: PathBuf,
    pub status: StatusReport,
    pub outcomes: Vec<OperationOutcome>,
}

/// Per-scan settings.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Branch every repository should be on; `None` disables the check.
    pub expected_branch: Option<String>,
    pub skip_symlinks: bool,
    pub warn_unversioned: bool,
    pub plan: OperationPlan,
}

/// Drives classification and operations over a candidate stream.
pub struct Scanner<'a, R: CommandRunner, S: OutputSink> {
    runner: &'a R,
    reporter: &'a mut Reporter<S>,
    options: &'a ScanOptions,
    cancel: CancellationToken,
}

impl<'a, R: CommandRunner, S: OutputSink> Scanner<'a, R, S> {
    pub const fn new(
        runner: &'a R,
        reporter: &'a mut Reporter<S>,
        options: &'a ScanOptions,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            runner,
            reporter,
            options,
            cancel,
        }
    }

    /// Scan every candidate and return the tally.
    ///
    /// # Errors
    ///
    /// - `GitError::CommandFailed` when the exec command fails; its
    ///   repository line has already been reported.
    /// - `GitError::Interrupted` when the cancellation token fires.
    /// - Spawn and output errors.
    pub async fn scan<I>(&mut self, candidates: I) -> Result<ScanTally>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut tally = ScanTally::default();

        for path in candidates {
            if self.cancel.is_cancelled() {
                return Err(GitError::Interrupted.into());
            }
            if has_ignore_marker(&path) {
                debug!(path = %path.display(), "ignore marker, skipping");
                continue;
            }
            if self.options.skip_symlinks && path.is_symlink() {
                debug!(path = %path.display(), "symlink, skipping");
                continue;
            }

            if is_git_repo(&path) {
                let result = self.scan_repository(&path).await?;
                tally.any_repository_found = true;
                if !result.status.clean {
                    tally.dirty_count += 1;
                }
                self.reporter.repository(&result)?;

                if let Some(failure) = ops::exec_failure(&path, &result.outcomes) {
                    return Err(failure.into());
                }
            } else if self.options.warn_unversioned && path.is_dir() {
                self.reporter.unversioned(&path)?;
            }
        }

        info!(
            found = tally.any_repository_found,
            dirty = tally.dirty_count,
            "scan finished"
        );
        Ok(tally)
    }

    #[instrument(skip(self, path), fields(repo = %path.display()))]
    async fn scan_repository(&self, path: &Path) -> Result<RepoResult> {
        let output = self.runner.git(path, &["status"]).await?;
        if self.cancel.is_cancelled() {
            return Err(GitError::Interrupted.into());
        }

        let status = status::classify(output.output(), self.options.expected_branch.as_deref());
        debug!(?status, "classified");

        let outcomes =
            ops::execute(self.runner, path, &status, &self.options.plan, &self.cancel).await?;

        Ok(RepoResult {
            path: path.to_path_buf(),
            status,
            outcomes,
        })
    }
}
