// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      ClusterError (pointer sized)
//!               |
//!       +-------+-------+
//!       |       |       |
//!       v       v       v
//!      Git     Cfg    Proc
//!      Box     Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git     NoRepositories, CommandFailed, Interrupted
//!   Config  ParseError, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed
//!
//! Scan-level code returns anyhow::Result; the GitError inside is
//! recovered with downcast_ref.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ClusterError`].
pub type ClusterResult<T> = std::result::Result<T, ClusterError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Scan ending error.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ClusterError {
                fn from(err: $error) -> Self {
                    ClusterError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
}

// --- Git Errors ---

/// Errors that end a scan.
///
/// Per-repository failures such as a rejected push are not errors; they are
/// reported as outcome tags and the scan continues.
#[derive(Debug, Error)]
pub enum GitError {
    /// Nothing under the scan root carried a `.git` marker.
    #[error("None of those sub directories had a .git file.")]
    NoRepositories { root: String },

    /// The user supplied command exited non-zero in a repository.
    #[error("command failed with exit code {code} in directory '{path}':\n{output}")]
    CommandFailed {
        path: String,
        code: i32,
        output: String,
    },

    /// The scan was stopped by an interrupt signal.
    #[error("scan interrupted")]
    Interrupted,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
