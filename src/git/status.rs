// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Classification of `git status` text.
//!
//! ```text
//! status text ──> BRANCH ──> CONTENT ──> AHEAD ──> StatusReport
//!                  rule       rule        rule
//!
//! start:   clean=true  can_pull=true  can_push=false
//! BRANCH   line 1 != "On branch <exp>"  mismatch, !pull, !clean
//! CONTENT  first match of:
//!            working tree clean         push
//!            only untracked files       untracked, push, !clean
//!            anything else              changes, !pull, !clean
//! AHEAD    "Your branch is ahead of"    ahead, !pull, !clean
//!          otherwise                    !push   (overrides CONTENT)
//! ```
//!
//! Every rule runs, in table order. Push is offered only when CONTENT granted
//! it and AHEAD kept it. Diverged branches read as ahead.

use regex::Regex;
use std::sync::LazyLock;

/// `git status` phrasing for a clean tree; "directory" became "tree" in git 2.9.1.
static CLEAN_TREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"nothing to commit.?.?working (directory|tree) clean.?")
        .expect("clean tree pattern is a valid regex")
});

const UNTRACKED_ONLY: &str = "nothing added to commit but untracked files present";
const AHEAD: &str = "Your branch is ahead of";
const ON_BRANCH: &str = "On branch ";

/// Structured view of one `git status` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub clean: bool,
    /// Actual branch when it differs from the expected one.
    pub branch_mismatch: Option<String>,
    pub has_untracked: bool,
    pub has_local_changes: bool,
    pub is_ahead: bool,
    pub can_push: bool,
    pub can_pull: bool,
}

impl StatusReport {
    /// State before any rule has run.
    #[must_use]
    pub const fn fresh() -> Self {
        Self {
            clean: true,
            branch_mismatch: None,
            has_untracked: false,
            has_local_changes: false,
            is_ahead: false,
            can_push: false,
            can_pull: true,
        }
    }
}

/// Inputs a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct StatusInput<'a> {
    pub output: &'a str,
    pub expected_branch: Option<&'a str>,
}

/// One step of the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&StatusInput<'_>) -> bool,
    pub effect: fn(&StatusInput<'_>, &mut StatusReport),
    /// Runs when `applies` is false.
    pub otherwise: Option<fn(&mut StatusReport)>,
}

impl Rule {
    /// Apply this rule on its own.
    pub fn apply(&self, input: &StatusInput<'_>, report: &mut StatusReport) {
        if (self.applies)(input) {
            (self.effect)(input, report);
        } else if let Some(otherwise) = self.otherwise {
            otherwise(report);
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Content states, tested in order; the first hit wins.
type ContentState = (fn(&str) -> bool, fn(&mut StatusReport));

const CONTENT_STATES: [ContentState; 3] = [
    (is_clean_tree, grant_push),
    (has_only_untracked, mark_untracked),
    (always, mark_local_changes),
];

/// The classification table, in evaluation order.
pub const RULES: [Rule; 3] = [
    Rule {
        name: "branch",
        applies: branch_differs,
        effect: mark_branch_mismatch,
        otherwise: None,
    },
    Rule {
        name: "content",
        applies: always_input,
        effect: classify_content,
        otherwise: None,
    },
    Rule {
        name: "ahead",
        applies: is_ahead,
        effect: mark_ahead,
        otherwise: Some(revoke_push),
    },
];

/// Classify the output of `git status`.
///
/// `expected_branch` of `None` or `""` disables the branch check.
#[must_use]
pub fn classify(output: &str, expected_branch: Option<&str>) -> StatusReport {
    let input = StatusInput {
        output,
        expected_branch: expected_branch.filter(|b| !b.is_empty()),
    };
    let mut report = StatusReport::fresh();
    for rule in &RULES {
        rule.apply(&input, &mut report);
    }
    report
}

/// Branch name from the first status line, without the `On branch ` prefix.
///
/// Old git prefixes every line with `# `. Any other first line, such as
/// `HEAD detached at 1a2b3c4`, is returned as is.
#[must_use]
pub fn current_branch(output: &str) -> String {
    let first = output.lines().next().unwrap_or_default();
    let first = first.strip_prefix("# ").unwrap_or(first);
    first.strip_prefix(ON_BRANCH).unwrap_or(first).to_string()
}

fn branch_differs(input: &StatusInput<'_>) -> bool {
    input
        .expected_branch
        .is_some_and(|expected| current_branch(input.output) != expected)
}

fn mark_branch_mismatch(input: &StatusInput<'_>, report: &mut StatusReport) {
    report.branch_mismatch = Some(current_branch(input.output));
    report.can_pull = false;
    report.clean = false;
}

const fn always_input(_: &StatusInput<'_>) -> bool {
    true
}

fn classify_content(input: &StatusInput<'_>, report: &mut StatusReport) {
    if let Some((_, effect)) = CONTENT_STATES
        .iter()
        .find(|(matches, _)| matches(input.output))
    {
        effect(report);
    }
}

fn is_clean_tree(output: &str) -> bool {
    CLEAN_TREE.is_match(output)
}

fn has_only_untracked(output: &str) -> bool {
    output.contains(UNTRACKED_ONLY)
}

const fn always(_: &str) -> bool {
    true
}

const fn grant_push(report: &mut StatusReport) {
    report.can_push = true;
}

const fn mark_untracked(report: &mut StatusReport) {
    report.has_untracked = true;
    report.can_push = true;
    report.clean = false;
}

const fn mark_local_changes(report: &mut StatusReport) {
    report.has_local_changes = true;
    report.can_pull = false;
    report.clean = false;
}

fn is_ahead(input: &StatusInput<'_>) -> bool {
    input.output.contains(AHEAD)
}

const fn mark_ahead(_: &StatusInput<'_>, report: &mut StatusReport) {
    report.is_ahead = true;
    report.can_pull = false;
    report.clean = false;
}

const fn revoke_push(report: &mut StatusReport) {
    report.can_push = false;
}
