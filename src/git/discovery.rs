// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Candidate directory discovery.
//!
//! ```text
//! root/
//!   alpha/              yielded (repository, not descended)
//!     .git/
//!     vendor/           not visited
//!   beta/               yielded
//!     .clustergit-ignore
//!     nested/           not visited
//!   build-out/          dropped if an exclude regex matches the full path
//!   gamma/              yielded
//!     deep/             yielded only with recursive
//!   link -> /elsewhere  yielded; not followed with skip_symlinks
//! ```
//!
//! Children are sorted byte-lexically at every level and streamed lazily.

use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use crate::config::types::ExcludeSet;

/// File that makes the scanner skip a directory and its subtree.
pub const IGNORE_MARKER: &str = ".clustergit-ignore";

/// True when `path` holds a `.git` directory or file.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

/// True when `path` holds the ignore marker.
#[must_use]
pub fn has_ignore_marker(path: &Path) -> bool {
    path.join(IGNORE_MARKER).exists()
}

/// How far and through what the walker goes.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    pub recursive: bool,
    pub skip_symlinks: bool,
    pub exclude: ExcludeSet,
}

/// Lazily yield candidate directories below `root`, in discovery order.
///
/// The root itself is never yielded. Walk errors (unreadable directories,
/// symlink loops) are logged and skipped.
pub fn candidates(root: &Path, options: &DiscoveryOptions) -> impl Iterator<Item = PathBuf> + use<> {
    build_walker(root, options)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "walk error");
                None
            }
        })
        .filter(|entry| entry.depth() > 0 && is_candidate(entry))
        .map(DirEntry::into_path)
        .inspect(|path| trace!(path = %path.display(), "candidate"))
}

fn build_walker(root: &Path, options: &DiscoveryOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    // Plain directory walk: no hidden-file or ignore-file filtering
    builder.standard_filters(false);
    builder.follow_links(!options.skip_symlinks);
    builder.max_depth(if options.recursive { None } else { Some(1) });
    builder.sort_by_file_name(|a, b| a.cmp(b));

    let exclude = options.exclude.clone();
    builder.filter_entry(move |entry| {
        if exclude.is_excluded(entry.path()) {
            trace!(path = %entry.path().display(), "excluded");
            return false;
        }
        // Stop below repositories and marked directories
        if entry.depth() > 1
            && let Some(parent) = entry.path().parent()
            && (is_git_repo(parent) || has_ignore_marker(parent))
        {
            return false;
        }
        true
    });

    builder
}

fn is_candidate(entry: &DirEntry) -> bool {
    entry.path_is_symlink() || entry.file_type().is_some_and(|ft| ft.is_dir())
}
