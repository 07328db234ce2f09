// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rendering of scan results.
//!
//! ```text
//! RepoResult --> tags() --> [Tag { text, tone }]
//!                              |
//!   Reporter (filters: hide_clean, count_only, quiet)
//!                              |
//!                              v
//!   OutputSink.write_line("alpha          : ", tags)
//!      ConsoleSink   Palette::Ansi  -> colored tags
//!                    Palette::Plain -> bare text
//!      BufferSink    plain lines kept in memory
//! ```
//!
//! Line layout: `<path padded to align>: tag, tag, ...`

pub mod sink;


use std::io;
use std::path::{Path, PathBuf};

use crate::git::ops::{
    CheckoutOutcome, ExecOutcome, FetchOutcome, OperationOutcome, PullOutcome, PushOutcome,
};
use crate::git::status::StatusReport;
use crate::scan::{RepoResult, ScanTally};

pub use sink::{BufferSink, ConsoleSink, OutputSink, Palette};

/// Severity of a tag, mapped to a color by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Info,
    Warning,
    Failure,
}

/// One comma separated piece of a report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub text: String,
    pub tone: Tone,
}

impl Tag {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Report switches.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Width the path column is padded to.
    pub align: usize,
    pub hide_clean: bool,
    /// Print only the dirty count at the end.
    pub count_only: bool,
    /// No banner and no completion line.
    pub quiet: bool,
    /// Render paths relative to this directory.
    pub relative_to: Option<PathBuf>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            align: 40,
            hide_clean: false,
            count_only: false,
            quiet: false,
            relative_to: None,
        }
    }
}

/// Streams scan results to a sink.
#[derive(Debug)]
pub struct Reporter<S: OutputSink> {
    sink: S,
    options: ReportOptions,
}

impl<S: OutputSink> Reporter<S> {
    pub const fn new(sink: S, options: ReportOptions) -> Self {
        Self { sink, options }
    }

    #[cfg(test)]
    pub(crate) const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Clear the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    pub fn clear(&mut self) -> io::Result<()> {
        self.sink.clear_screen()
    }

    /// Announce the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    pub fn banner(&mut self, root: &Path) -> io::Result<()> {
        if self.options.quiet || self.options.count_only {
            return Ok(());
        }
        self.sink.write_text("Starting git status...")?;
        self.sink
            .write_text(&format!("Scanning sub directories of {}", root.display()))
    }

    /// Render one repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    pub fn repository(&mut self, result: &RepoResult) -> io::Result<()> {
        if self.options.count_only {
            return Ok(());
        }
        let tags = repository_tags(result, self.options.hide_clean);
        if tags.is_empty() {
            return Ok(());
        }
        let prefix = self.prefix(&result.path);
        self.sink.write_line(&prefix, &tags)
    }

    /// Warn about a directory without `.git`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    pub fn unversioned(&mut self, path: &Path) -> io::Result<()> {
        if self.options.count_only {
            return Ok(());
        }
        let prefix = self.prefix(path);
        self.sink
            .write_line(&prefix, &[Tag::new("Not a GIT repository", Tone::Warning)])
    }

    /// Print the dirty count or the completion line.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    pub fn finish(&mut self, tally: &ScanTally) -> io::Result<()> {
        if self.options.count_only {
            return self.sink.write_text(&tally.dirty_count.to_string());
        }
        if self.options.quiet {
            return Ok(());
        }
        self.sink.write_text("Done")
    }

    fn prefix(&self, path: &Path) -> String {
        let shown = display_path(path, self.options.relative_to.as_deref());
        format!("{shown:<width$}: ", width = self.options.align)
    }
}

/// Path as shown in the first column.
#[must_use]
pub fn display_path(path: &Path, relative_to: Option<&Path>) -> String {
    relative_to
        .and_then(|base| path.strip_prefix(base).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Tags for a repository line; empty means print nothing.
#[must_use]
pub fn repository_tags(result: &RepoResult, hide_clean: bool) -> Vec<Tag> {
    if result.status.clean {
        if hide_clean {
            return Vec::new();
        }
        return vec![Tag::new("Clean", Tone::Ok)];
    }
    let mut tags = status_tags(&result.status);
    tags.extend(
        result
            .outcomes
            .iter()
            .filter_map(|outcome| outcome_tag(outcome, hide_clean)),
    );
    tags
}

/// Tags describing a dirty working copy.
#[must_use]
pub fn status_tags(status: &StatusReport) -> Vec<Tag> {
    let mut tags = Vec::new();
    if let Some(branch) = &status.branch_mismatch {
        tags.push(Tag::new(format!("On branch {branch}"), Tone::Warning));
    }
    if status.has_local_changes {
        tags.push(Tag::new("Changes", Tone::Failure));
    } else if status.has_untracked {
        tags.push(Tag::new("Untracked files", Tone::Warning));
    } else {
        tags.push(Tag::new("No Changes", Tone::Info));
    }
    if status.is_ahead {
        tags.push(Tag::new("Unpushed commits", Tone::Failure));
    }
    tags
}

/// Tag for one operation outcome; `None` when nothing should be shown.
#[must_use]
pub fn outcome_tag(outcome: &OperationOutcome, hide_clean: bool) -> Option<Tag> {
    let tag = match outcome {
        OperationOutcome::Push(PushOutcome::Rejected) => Tag::new("Push rejected", Tone::Failure),
        OperationOutcome::Push(PushOutcome::PushedOk) => Tag::new("Pushed OK", Tone::Info),
        OperationOutcome::Pull(PullOutcome::Current) if hide_clean => return None,
        OperationOutcome::Pull(PullOutcome::Current) => Tag::new("Pulled nothing", Tone::Info),
        OperationOutcome::Pull(PullOutcome::Conflict) => Tag::new("Pull conflict", Tone::Failure),
        OperationOutcome::Pull(PullOutcome::NoRemote) => {
            Tag::new("Pull remote not configured", Tone::Warning)
        }
        OperationOutcome::Pull(PullOutcome::Fatal) => Tag::new("Pull fatal", Tone::Failure),
        OperationOutcome::Pull(PullOutcome::Pulled) => Tag::new("Pulled", Tone::Ok),
        OperationOutcome::Fetch(FetchOutcome::Fatal) => Tag::new("Fetch fatal", Tone::Failure),
        OperationOutcome::Fetch(FetchOutcome::Fetched) => Tag::new("Fetched", Tone::Info),
        OperationOutcome::Fetch(FetchOutcome::Unsuccessful) => {
            Tag::new("Fetch unsuccessful", Tone::Failure)
        }
        OperationOutcome::Exec(ExecOutcome::Success(output)) => {
            let trimmed = output.trim();
            if trimmed.is_empty() {
                return None;
            }
            Tag::new(trimmed, Tone::Info)
        }
        OperationOutcome::Exec(ExecOutcome::Failure { .. }) => {
            Tag::new("Command failed", Tone::Failure)
        }
        OperationOutcome::Checkout(CheckoutOutcome::AlreadyOn) if hide_clean => return None,
        OperationOutcome::Checkout(CheckoutOutcome::AlreadyOn) => Tag::new("No action", Tone::Info),
        OperationOutcome::Checkout(CheckoutOutcome::Failed) => {
            Tag::new("Checkout failed", Tone::Failure)
        }
        OperationOutcome::Checkout(CheckoutOutcome::Success) => {
            Tag::new("Checkout successful", Tone::Ok)
        }
    };
    Some(tag)
}
