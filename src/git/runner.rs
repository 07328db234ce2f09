// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command execution seam between the scanner and the operating system.
//!
//! ```text
//! CommandRunner (trait)
//!   .git(repo, args)      --> CommandResult
//!   .shell(repo, command) --> CommandResult
//!         |
//!         v
//! SystemRunner --> ProcessBuilder --> git / sh -c
//!                  cwd = repo
//!                  env = LC_ALL=C, LANG=C, no prompts
//! ```
//!
//! A non-zero exit is data, not an error. Only a failed spawn is an `Err`.

use std::path::{Path, PathBuf};

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{ClusterResult, Result};

/// Environment every git invocation runs with.
///
/// The classifier matches English status text, so the locale is pinned to `C`.
/// Credential helpers and terminal prompts are disabled so a push or pull
/// against a protected remote fails instead of waiting on stdin.
pub const GIT_ENV: [(&str, &str); 4] = [
    ("LC_ALL", "C"),
    ("LANG", "C"),
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GCM_INTERACTIVE", "never"),
];

/// Exit code and combined output of one subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    exit_code: i32,
    output: String,
}

impl CommandResult {
    #[must_use]
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Stdout and stderr, interleaved.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs commands inside a repository.
///
/// Implemented by [`SystemRunner`] for real processes; tests script it.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `git <args>` with `repo` as the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be spawned.
    async fn git(&self, repo: &Path, args: &[&str]) -> Result<CommandResult>;

    /// Run a user supplied shell command with `repo` as the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell could not be spawned.
    async fn shell(&self, repo: &Path, command: &str) -> Result<CommandResult>;
}

/// Spawns real `git` and shell processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    git: PathBuf,
}

impl SystemRunner {
    /// Resolves `git` from PATH once so every invocation uses the same binary.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if git is not installed.
    pub fn locate() -> ClusterResult<Self> {
        let git = ProcessBuilder::which("git")?.program().clone();
        Ok(Self { git })
    }

    /// Uses an explicit git binary.
    #[must_use]
    pub fn with_git(git: impl Into<PathBuf>) -> Self {
        Self { git: git.into() }
    }

    #[must_use]
    pub fn git_path(&self) -> &Path {
        &self.git
    }
}

impl CommandRunner for SystemRunner {
    async fn git(&self, repo: &Path, args: &[&str]) -> Result<CommandResult> {
        let output = ProcessBuilder::new(&self.git)
            .name("git")
            .args(args)
            .cwd(repo)
            .envs(GIT_ENV)
            .capture_combined()
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;

        let exit_code = output.exit_code();
        Ok(CommandResult::new(exit_code, output.into_combined()))
    }

    async fn shell(&self, repo: &Path, command: &str) -> Result<CommandResult> {
        let output = ProcessBuilder::raw(command)
            .name("exec")
            .cwd(repo)
            .capture_combined()
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;

        let exit_code = output.exit_code();
        Ok(CommandResult::new(exit_code, output.into_combined()))
    }
}
