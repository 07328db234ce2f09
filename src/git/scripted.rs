// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canned `CommandRunner` for unit tests.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use super::runner::{CommandResult, CommandRunner};
use crate::error::Result;

/// Answers commands from a queue and records what was asked.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    responses: Mutex<VecDeque<CommandResult>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next command.
    pub(crate) fn respond(self, exit_code: i32, output: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(CommandResult::new(exit_code, output));
        self
    }

    /// Every command run so far, as `<dir>: <command line>`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, repo: &Path, command: String) -> CommandResult {
        let dir = repo
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        self.calls.lock().unwrap().push(format!("{dir}: {command}"));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for `{command}`"))
    }
}

impl CommandRunner for ScriptedRunner {
    async fn git(&self, repo: &Path, args: &[&str]) -> Result<CommandResult> {
        Ok(self.answer(repo, format!("git {}", args.join(" "))))
    }

    async fn shell(&self, repo: &Path, command: &str) -> Result<CommandResult> {
        Ok(self.answer(repo, format!("sh {command}")))
    }
}
