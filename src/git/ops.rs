// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Follow-up operations run on a classified repository.
//!
//! ```text
//! execute(runner, repo, status, plan)
//!   push      if plan.push && status.can_push   [rejected] ?
//!   pull      if plan.pull && status.can_pull   up to date / CONFLICT / fatal
//!   fetch     if plan.fetch                     error: / exit code
//!   exec      if plan.exec                      exit code (non-zero stops here)
//!   checkout  if plan.checkout                  Already on / error:
//!     |
//!     v
//!   Vec<OperationOutcome>   (skipped operations leave no entry)
//! ```
//!
//! Each outcome is picked by the first matching substring in the raw output.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::runner::{CommandResult, CommandRunner};
use super::status::StatusReport;
use crate::config::types::RemoteSpec;
use crate::error::{GitError, Result};

/// ANSI SGR and cursor sequences emitted by colorizing tools.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ansi escape pattern is a valid regex")
});

/// Which operations to attempt, and with what parameters.
#[derive(Debug, Clone, Default)]
pub struct OperationPlan {
    pub push: bool,
    pub pull: bool,
    pub fetch: bool,
    pub remote: RemoteSpec,
    /// Shell command run in every repository.
    pub exec: Option<String>,
    /// Branch to check out in every repository.
    pub checkout: Option<String>,
    /// Remove ANSI sequences from exec output.
    pub strip_colors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Rejected,
    PushedOk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Current,
    Conflict,
    NoRemote,
    Fatal,
    Pulled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    Fatal,
    /// Non-zero exit; reported next to `Fetched` or `Fatal`.
    Unsuccessful,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    Success(String),
    Failure { exit_code: i32, output: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    AlreadyOn,
    Failed,
    Success,
}

/// Result of one operation on one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Push(PushOutcome),
    Pull(PullOutcome),
    Fetch(FetchOutcome),
    Exec(ExecOutcome),
    Checkout(CheckoutOutcome),
}

/// Interpret `git push` output.
#[must_use]
pub fn classify_push(output: &str) -> PushOutcome {
    if output.contains("[rejected]") {
        PushOutcome::Rejected
    } else {
        PushOutcome::PushedOk
    }
}

/// Interpret `git pull` output.
#[must_use]
pub fn classify_pull(output: &str) -> PullOutcome {
    // git 2.15 dropped the hyphens
    if output.contains("Already up-to-date") || output.contains("Already up to date") {
        PullOutcome::Current
    } else if output.contains("CONFLICT") {
        PullOutcome::Conflict
    } else if output.contains("fatal: No remote repository specified.") {
        PullOutcome::NoRemote
    } else if output.contains("fatal: ") {
        PullOutcome::Fatal
    } else {
        PullOutcome::Pulled
    }
}

/// Interpret `git fetch` output; may yield two outcomes.
#[must_use]
pub fn classify_fetch(result: &CommandResult) -> Vec<FetchOutcome> {
    let mut outcomes = vec![if result.output().contains("error: ") {
        FetchOutcome::Fatal
    } else {
        FetchOutcome::Fetched
    }];
    if !result.success() {
        outcomes.push(FetchOutcome::Unsuccessful);
    }
    outcomes
}

/// Interpret `git checkout` output.
#[must_use]
pub fn classify_checkout(output: &str) -> CheckoutOutcome {
    if output.contains("Already on") {
        CheckoutOutcome::AlreadyOn
    } else if output.contains("error: ") {
        CheckoutOutcome::Failed
    } else {
        CheckoutOutcome::Success
    }
}

/// Remove ANSI escape sequences.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Run the planned operations whose preconditions hold.
///
/// A failing exec command ends the list: later operations are not attempted
/// and the caller is expected to abort the scan. A cancelled `cancel` token is
/// honored between subprocesses.
///
/// # Errors
///
/// Returns an error if a subprocess cannot be spawned, or
/// `GitError::Interrupted` when cancellation is observed.
pub async fn execute<R: CommandRunner>(
    runner: &R,
    repo: &Path,
    status: &StatusReport,
    plan: &OperationPlan,
    cancel: &CancellationToken,
) -> Result<Vec<OperationOutcome>> {
    let mut outcomes = Vec::new();

    if plan.push && status.can_push {
        let args: Vec<&str> = std::iter::once("push").chain(plan.remote.args()).collect();
        let result = run_git(runner, repo, &args, cancel).await?;
        outcomes.push(OperationOutcome::Push(classify_push(result.output())));
    }

    if plan.pull && status.can_pull {
        let args: Vec<&str> = std::iter::once("pull").chain(plan.remote.args()).collect();
        let result = run_git(runner, repo, &args, cancel).await?;
        outcomes.push(OperationOutcome::Pull(classify_pull(result.output())));
    }

    if plan.fetch {
        let args: Vec<&str> = ["fetch", "--all", "--prune"]
            .into_iter()
            .chain(plan.remote.args())
            .collect();
        let result = run_git(runner, repo, &args, cancel).await?;
        outcomes.extend(classify_fetch(&result).into_iter().map(OperationOutcome::Fetch));
    }

    if let Some(command) = &plan.exec {
        let result = runner.shell(repo, command).await?;
        check_cancelled(cancel)?;
        let output = if plan.strip_colors {
            strip_ansi(result.output())
        } else {
            result.output().to_string()
        };
        debug!(repo = %repo.display(), exit_code = result.exit_code(), "exec finished");
        if !result.success() {
            outcomes.push(OperationOutcome::Exec(ExecOutcome::Failure {
                exit_code: result.exit_code(),
                output,
            }));
            return Ok(outcomes);
        }
        outcomes.push(OperationOutcome::Exec(ExecOutcome::Success(output)));
    }

    if let Some(branch) = &plan.checkout {
        let result = run_git(runner, repo, &["checkout", branch], cancel).await?;
        outcomes.push(OperationOutcome::Checkout(classify_checkout(result.output())));
    }

    Ok(outcomes)
}

/// Find the exec failure in an outcome list, if any.
#[must_use]
pub fn exec_failure(repo: &Path, outcomes: &[OperationOutcome]) -> Option<GitError> {
    outcomes.iter().find_map(|outcome| match outcome {
        OperationOutcome::Exec(ExecOutcome::Failure { exit_code, output }) => {
            Some(GitError::CommandFailed {
                path: repo.display().to_string(),
                code: *exit_code,
                output: output.clone(),
            })
        }
        _ => None,
    })
}

async fn run_git<R: CommandRunner>(
    runner: &R,
    repo: &Path,
    args: &[&str],
    cancel: &CancellationToken,
) -> Result<CommandResult> {
    let result = runner.git(repo, args).await?;
    check_cancelled(cancel)?;
    Ok(result)
}

fn check_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(GitError::Interrupted.into());
    }
    Ok(())
}
