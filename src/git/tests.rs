// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::config::types::{ExcludeSet, RemoteSpec};
use crate::error::GitError;
use crate::git::discovery::{DiscoveryOptions, IGNORE_MARKER, candidates, is_git_repo};
use crate::git::ops::{
    CheckoutOutcome, ExecOutcome, FetchOutcome, OperationOutcome, OperationPlan, PullOutcome,
    PushOutcome, classify_checkout, classify_pull, execute, exec_failure, strip_ansi,
};
use crate::git::runner::CommandResult;
use crate::git::scripted::ScriptedRunner;
use crate::git::status::{RULES, StatusInput, StatusReport, classify, current_branch};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const CLEAN: &str = "On branch master
Your branch is up to date with 'origin/master'.

nothing to commit, working tree clean
";

const AHEAD_CLEAN: &str = "On branch master
Your branch is ahead of 'origin/master' by 2 commits.
  (use \"git push\" to publish your local commits)

nothing to commit, working tree clean
";

const UNTRACKED: &str = "On branch master
Untracked files:
  (use \"git add <file>...\" to include in what will be committed)
\tnotes.txt

nothing added to commit but untracked files present (use \"git add\" to track)
";

const MODIFIED: &str = "On branch master
Changes not staged for commit:
  (use \"git add <file>...\" to update what will be committed)
\tmodified:   src/lib.rs

no changes added to commit (use \"git add\" and/or \"git commit -a\")
";

const FEATURE_CLEAN: &str = "On branch feature-x
nothing to commit, working tree clean
";

// --- Classifier ---

#[test]
fn test_classify_clean_tree() {
    let report = classify(CLEAN, Some("master"));
    assert!(report.clean);
    assert!(report.can_pull);
    assert!(!report.can_push, "nothing ahead, nothing to push");
    assert!(!report.has_untracked && !report.has_local_changes);
    assert_eq!(report.branch_mismatch, None);
}

#[test]
fn test_classify_ahead_clean_tree() {
    let report = classify(AHEAD_CLEAN, Some("master"));
    assert!(report.is_ahead);
    assert!(report.can_push);
    assert!(!report.can_pull);
    assert!(!report.clean);
}

#[test]
fn test_classify_untracked_only() {
    let report = classify(UNTRACKED, Some("master"));
    assert!(report.has_untracked);
    assert!(!report.has_local_changes);
    assert!(!report.clean);
    assert!(report.can_pull);
    assert!(!report.can_push, "untracked files alone are not pushable");
}

#[test]
fn test_classify_untracked_and_ahead_can_push() {
    let text = format!("{AHEAD_CLEAN}\n{UNTRACKED}").replace(
        "nothing to commit, working tree clean",
        "",
    );
    let report = classify(&text, Some("master"));
    assert!(report.has_untracked);
    assert!(report.is_ahead);
    assert!(report.can_push);
    assert!(!report.can_pull);
}

#[test]
fn test_classify_modified() {
    let report = classify(MODIFIED, Some("master"));
    assert!(report.has_local_changes);
    assert!(!report.can_push);
    assert!(!report.can_pull);
    assert!(!report.clean);
}

#[test]
fn test_classify_branch_mismatch() {
    let report = classify(FEATURE_CLEAN, Some("master"));
    assert_eq!(report.branch_mismatch.as_deref(), Some("feature-x"));
    assert!(!report.can_pull);
    assert!(!report.clean);
}

#[test]
fn test_classify_branch_sharing_expected_prefix_is_mismatch() {
    for (actual, expected) in [("master-old", "master"), ("main-v2", "main"), ("release-2", "release")] {
        let text = format!("On branch {actual}\nnothing to commit, working tree clean\n");
        let report = classify(&text, Some(expected));
        assert_eq!(report.branch_mismatch.as_deref(), Some(actual));
        assert!(!report.clean);
        assert!(!report.can_pull);
    }
}

#[test]
fn test_classify_branch_named_later_in_output_is_ignored() {
    let text = "On branch feature-x\nOn branch master\nnothing to commit, working tree clean\n";
    let report = classify(text, Some("master"));
    assert_eq!(report.branch_mismatch.as_deref(), Some("feature-x"));
}

#[test]
fn test_classify_detached_head_is_mismatch() {
    let text = "HEAD detached at 1a2b3c4\nnothing to commit, working tree clean\n";
    let report = classify(text, Some("master"));
    assert_eq!(report.branch_mismatch.as_deref(), Some("HEAD detached at 1a2b3c4"));
    assert!(!report.clean);
    assert!(!report.can_pull);
}

#[test]
fn test_classify_branch_check_disabled() {
    assert_eq!(classify(FEATURE_CLEAN, None).branch_mismatch, None);
    assert_eq!(classify(FEATURE_CLEAN, Some("")).branch_mismatch, None);
    assert!(classify(FEATURE_CLEAN, Some("")).clean);
}

#[test]
fn test_classify_old_git_phrasing() {
    let text = "# On branch master\nnothing to commit (working directory clean)\n";
    let report = classify(text, Some("master"));
    assert!(report.clean);
    assert!(!report.has_local_changes);
}

#[test]
fn test_classify_is_idempotent() {
    for text in [CLEAN, AHEAD_CLEAN, UNTRACKED, MODIFIED, FEATURE_CLEAN] {
        assert_eq!(classify(text, Some("master")), classify(text, Some("master")));
    }
}

#[test]
fn test_current_branch_strips_prefix() {
    assert_eq!(current_branch(FEATURE_CLEAN), "feature-x");
    assert_eq!(current_branch("HEAD detached at 1a2b3c4\n"), "HEAD detached at 1a2b3c4");
    assert_eq!(current_branch("# On branch master\n"), "master");
    assert_eq!(current_branch(""), "");
}

#[test]
fn test_rule_table_order() {
    let names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(names, ["branch", "content", "ahead"]);
}

#[test]
fn test_content_rule_alone_grants_push_on_clean_tree() {
    let input = StatusInput {
        output: CLEAN,
        expected_branch: None,
    };
    let mut report = StatusReport::fresh();
    RULES[1].apply(&input, &mut report);
    assert!(report.can_push);
    assert!(report.clean);
}

#[test]
fn test_ahead_rule_alone_revokes_push() {
    let input = StatusInput {
        output: CLEAN,
        expected_branch: None,
    };
    let mut report = StatusReport::fresh();
    report.can_push = true;
    RULES[2].apply(&input, &mut report);
    assert!(!report.can_push);
    assert!(!report.is_ahead);
}

#[test]
fn test_branch_rule_alone() {
    let input = StatusInput {
        output: FEATURE_CLEAN,
        expected_branch: Some("main"),
    };
    let mut report = StatusReport::fresh();
    RULES[0].apply(&input, &mut report);
    insta::assert_debug_snapshot!(report, @r#"
    StatusReport {
        clean: false,
        branch_mismatch: Some(
            "feature-x",
        ),
        has_untracked: false,
        has_local_changes: false,
        is_ahead: false,
        can_push: false,
        can_pull: false,
    }
    "#);
}

// --- Outcome classification ---

#[test]
fn test_classify_pull_first_match_wins() {
    let cases = [
        ("Already up to date.", PullOutcome::Current),
        ("Already up-to-date.", PullOutcome::Current),
        ("CONFLICT (content): Merge conflict in a.txt", PullOutcome::Conflict),
        ("fatal: No remote repository specified.  Please, specify either a URL", PullOutcome::NoRemote),
        ("fatal: couldn't find remote ref main", PullOutcome::Fatal),
        ("Updating 1a2b..3c4d\nFast-forward\n a.txt | 1 +", PullOutcome::Pulled),
    ];
    for (output, expected) in cases {
        assert_eq!(classify_pull(output), expected, "{output}");
    }
}

#[test]
fn test_classify_checkout() {
    assert_eq!(classify_checkout("Already on 'main'"), CheckoutOutcome::AlreadyOn);
    assert_eq!(
        classify_checkout("error: pathspec 'nope' did not match any file(s) known to git"),
        CheckoutOutcome::Failed
    );
    assert_eq!(classify_checkout("Switched to branch 'dev'"), CheckoutOutcome::Success);
}

#[test]
fn test_strip_ansi() {
    assert_eq!(strip_ansi("\x1b[1;32mok\x1b[0m done\x1b[K"), "ok done");
    assert_eq!(strip_ansi("plain"), "plain");
}

// --- Executor ---

fn plan() -> OperationPlan {
    OperationPlan::default()
}

fn repo() -> PathBuf {
    PathBuf::from("/work/alpha")
}

#[tokio::test]
async fn test_execute_empty_plan_runs_nothing() {
    let runner = ScriptedRunner::new();
    let status = classify(AHEAD_CLEAN, Some("master"));
    let outcomes = execute(&runner, &repo(), &status, &plan(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(outcomes.is_empty());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_execute_push_skipped_without_can_push() {
    let runner = ScriptedRunner::new();
    let status = classify(CLEAN, Some("master"));
    let plan = OperationPlan {
        push: true,
        ..plan()
    };
    let outcomes = execute(&runner, &repo(), &status, &plan, &CancellationToken::new())
        .await
        .unwrap();

    assert!(outcomes.is_empty());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_execute_push_rejected_with_remote_spec() {
    let runner = ScriptedRunner::new().respond(
        1,
        " ! [rejected]        master -> master (fetch first)\nerror: failed to push some refs",
    );
    let status = classify(AHEAD_CLEAN, Some("master"));
    let plan = OperationPlan {
        push: true,
        remote: RemoteSpec::parse("origin:master"),
        ..plan()
    };
    let outcomes = execute(&runner, &repo(), &status, &plan, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcomes, vec![OperationOutcome::Push(PushOutcome::Rejected)]);
    assert_eq!(runner.calls(), vec!["alpha: git push origin master"]);
}

#[tokio::test]
async fn test_execute_runs_operations_in_fixed_order() {
    let runner = ScriptedRunner::new()
        .respond(0, "Already up to date.")
        .respond(0, "Fetching origin")
        .respond(0, "hello from alpha\n")
        .respond(0, "Already on 'master'");
    let status = classify(CLEAN, Some("master"));
    let plan = OperationPlan {
        push: true,
        pull: true,
        fetch: true,
        exec: Some("echo hi".to_string()),
        checkout: Some("master".to_string()),
        remote: RemoteSpec::parse(":master"),
        strip_colors: false,
    };
    let outcomes = execute(&runner, &repo(), &status, &plan, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        outcomes,
        vec![
            OperationOutcome::Pull(PullOutcome::Current),
            OperationOutcome::Fetch(FetchOutcome::Fetched),
            OperationOutcome::Exec(ExecOutcome::Success("hello from alpha\n".to_string())),
            OperationOutcome::Checkout(CheckoutOutcome::AlreadyOn),
        ]
    );
    insta::assert_debug_snapshot!(runner.calls(), @r#"
    [
        "alpha: git pull master",
        "alpha: git fetch --all --prune master",
        "alpha: sh echo hi",
        "alpha: git checkout master",
    ]
    "#);
}

#[tokio::test]
async fn test_execute_fetch_error_and_exit_code() {
    let runner = ScriptedRunner::new().respond(1, "error: could not fetch origin");
    let status = classify(MODIFIED, Some("master"));
    let plan = OperationPlan {
        fetch: true,
        ..plan()
    };
    let outcomes = execute(&runner, &repo(), &status, &plan, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        outcomes,
        vec![
            OperationOutcome::Fetch(FetchOutcome::Fatal),
            OperationOutcome::Fetch(FetchOutcome::Unsuccessful),
        ]
    );
}

#[tokio::test]
async fn test_execute_exec_failure_stops_later_operations() {
    let runner = ScriptedRunner::new().respond(2, "\x1b[31mboom\x1b[0m");
    let status = classify(CLEAN, Some("master"));
    let plan = OperationPlan {
        exec: Some("make check".to_string()),
        checkout: Some("dev".to_string()),
        strip_colors: true,
        ..plan()
    };
    let outcomes = execute(&runner, &repo(), &status, &plan, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        outcomes,
        vec![OperationOutcome::Exec(ExecOutcome::Failure {
            exit_code: 2,
            output: "boom".to_string(),
        })]
    );
    assert_eq!(runner.calls(), vec!["alpha: sh make check"]);

    let err = exec_failure(&repo(), &outcomes).expect("failure should be reported");
    insta::assert_snapshot!(err.to_string(), @r"
    command failed with exit code 2 in directory '/work/alpha':
    boom
    ");
}

#[tokio::test]
async fn test_execute_stops_when_cancelled() {
    let runner = ScriptedRunner::new().respond(0, "Fetching origin");
    let status = classify(CLEAN, Some("master"));
    let plan = OperationPlan {
        fetch: true,
        checkout: Some("dev".to_string()),
        ..plan()
    };
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = execute(&runner, &repo(), &status, &plan, &cancel)
        .await
        .expect_err("cancelled scan should stop");
    assert!(matches!(err.downcast_ref::<GitError>(), Some(GitError::Interrupted)));
    assert_eq!(runner.calls().len(), 1, "the running command finishes, nothing more starts");
}

#[test]
fn test_command_result_success() {
    assert!(CommandResult::new(0, "").success());
    assert!(!CommandResult::new(128, "fatal").success());
}

// --- Discovery ---

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn mkdirs(root: &Path, dirs: &[&str]) {
    for dir in dirs {
        std::fs::create_dir_all(root.join(dir)).expect("failed to create dir");
    }
}

fn relative(root: &Path, found: impl Iterator<Item = PathBuf>) -> Vec<String> {
    found
        .map(|p| {
            p.strip_prefix(root)
                .expect("candidate below root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

/// root/
///   alpha/.git  alpha/inner
///   beta/deep
///   gamma/.clustergit-ignore  gamma/sub
///   skipme/
///   notes.txt
fn sample_tree() -> TempDir {
    let temp = temp_dir();
    let root = temp.path();
    mkdirs(root, &["alpha/.git", "alpha/inner", "beta/deep", "gamma/sub", "skipme"]);
    std::fs::write(root.join("gamma").join(IGNORE_MARKER), "").unwrap();
    std::fs::write(root.join("notes.txt"), "x").unwrap();
    temp
}

#[test]
fn test_candidates_top_level_sorted() {
    let temp = sample_tree();
    let found = candidates(temp.path(), &DiscoveryOptions::default());
    assert_eq!(relative(temp.path(), found), ["alpha", "beta", "gamma", "skipme"]);
}

#[test]
fn test_candidates_recursive_stops_at_repos_and_markers() {
    let temp = sample_tree();
    let options = DiscoveryOptions {
        recursive: true,
        ..DiscoveryOptions::default()
    };
    let found = candidates(temp.path(), &options);
    assert_eq!(
        relative(temp.path(), found),
        ["alpha", "beta", "beta/deep", "gamma", "skipme"]
    );
}

#[test]
fn test_candidates_exclude_prunes_subtree() {
    let temp = sample_tree();
    let options = DiscoveryOptions {
        recursive: true,
        exclude: ExcludeSet::new(&["beta$", "skipme$"]).unwrap(),
        ..DiscoveryOptions::default()
    };
    let found = candidates(temp.path(), &options);
    assert_eq!(relative(temp.path(), found), ["alpha", "gamma"]);
}

#[cfg(unix)]
#[test]
fn test_candidates_symlink_policy() {
    let temp = sample_tree();
    let root = temp.path();
    std::os::unix::fs::symlink(root.join("beta"), root.join("link")).unwrap();

    let follow = DiscoveryOptions {
        recursive: true,
        ..DiscoveryOptions::default()
    };
    let found = relative(root, candidates(root, &follow));
    assert!(found.contains(&"link".to_string()));
    assert!(found.contains(&"link/deep".to_string()));

    let skip = DiscoveryOptions {
        recursive: true,
        skip_symlinks: true,
        ..DiscoveryOptions::default()
    };
    let found = relative(root, candidates(root, &skip));
    assert!(found.contains(&"link".to_string()), "link itself is still a candidate");
    assert!(!found.contains(&"link/deep".to_string()));
}

#[test]
fn test_is_git_repo_accepts_git_file() {
    let temp = temp_dir();
    assert!(!is_git_repo(temp.path()));
    std::fs::write(temp.path().join(".git"), "gitdir: ../elsewhere").unwrap();
    assert!(is_git_repo(temp.path()));
}
