// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use super::io::decode_line;

#[tokio::test]
async fn test_process_echo() {
    #[cfg(windows)]
    let output = ProcessBuilder::raw("Write-Output 'hello'")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    #[cfg(not(windows))]
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[tokio::test]
async fn test_process_exit_code_allowed() {
    let output = ProcessBuilder::raw("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[tokio::test]
async fn test_process_exit_code_rejected_without_allow_failure() {
    let result = ProcessBuilder::raw("exit 3").run().await;
    let err = result.expect_err("non-zero exit should be an error");
    assert!(err.to_string().contains("exited with code 3"), "{err}");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_env_override() {
    let output = ProcessBuilder::raw("echo $CLUSTERGIT_TEST_VAR")
        .env("CLUSTERGIT_TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    insta::assert_snapshot!(output.stdout().trim(), @"test_value");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_cwd() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

    let output = ProcessBuilder::new("ls")
        .cwd(dir.path())
        .capture_stdout()
        .run()
        .await
        .expect("ls should succeed");

    assert_eq!(output.stdout().trim(), "marker.txt");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_combined_capture_keeps_both_streams() {
    let output = ProcessBuilder::raw("echo out; echo err 1>&2; exit 1")
        .capture_combined()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 1);
    assert!(output.stdout().contains("out"));
    assert!(output.stdout().contains("err"));
    assert!(output.stderr().is_empty());
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_separate_capture_into_combined() {
    let output = ProcessBuilder::raw("echo out; echo err 1>&2")
        .capture_output()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout(), "out");
    assert_eq!(output.stderr(), "err");
    assert_eq!(output.into_combined(), "out\nerr");
}

#[tokio::test]
async fn test_spawn_failure_is_an_error() {
    let result = ProcessBuilder::new("nonexistent_program_12345")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await;
    let err = result.expect_err("spawning a missing program should fail");
    assert!(err.to_string().contains("nonexistent_program_12345"), "{err}");
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("git").args(["commit", "-m", "two words"]);
    assert_eq!(builder.command_line(), "git commit -m \"two words\"");
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    let which_result = ProcessBuilder::which(program);
    let err_msg = format!("{}", which_result.unwrap_err());
    assert!(
        err_msg.contains("not found") && err_msg.contains(program),
        "which: error should mention the program: {err_msg}"
    );

    assert!(ProcessBuilder::find(program).is_none());
}

#[test]
fn test_decode_line_is_lossy_and_strips_terminators() {
    assert_eq!(decode_line(b"caf\xe9\n"), "caf\u{fffd}");
    assert_eq!(decode_line(b"dos\r\n"), "dos");
    assert_eq!(decode_line(b"last"), "last");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_invalid_utf8_output_is_kept_and_drained() {
    let output = ProcessBuilder::raw(r"printf 'caf\351\n'; seq 1 200000")
        .capture_combined()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 0, "reader must not close the pipe early");
    let lines: Vec<&str> = output.stdout().lines().collect();
    assert_eq!(lines.len(), 200_001);
    assert_eq!(lines[0], "caf\u{fffd}");
    assert_eq!(lines[200_000], "200000");
}
