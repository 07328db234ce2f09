// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for clustergit-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! clustergit [config/log options] [scan options]
//!
//!   config/log   -i FILE  -l LEVEL  --log-file  --file-log-level
//!   scan         -d DIR  -b BRANCH  --recursive  --skip-symlinks  -e REGEX  -U
//!   actions      --push  -p  -f  -r REMOTE  --exec CMD  -B BRANCH
//!   output       -a WIDTH  -q  -H  -C  -R  -n  -c  -v
//! ```

pub mod global;
pub mod scan;


use crate::cli::global::GlobalOptions;
use crate::cli::scan::ScanArgs;
use clap::Parser;

/// Git Repository Cluster Status Tool
///
/// Runs git status, and optionally push, pull, fetch, checkout or a shell
/// command, over every repository below a directory.
#[derive(Debug, Parser)]
#[command(
    name = "clustergit",
    author,
    version,
    about = "Git Repository Cluster Status Tool",
    long_about = "clustergit-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Scans the sub directories of a directory for git repositories\n\
                  and reports their status on one line each. Invoking\n\
                  `clustergit -d ~/src --pull` pulls every clean repository that\n\
                  is on the expected branch.",
    after_help = "CONFIG FILES:\n\n\
                  clustergit reads `clustergit.toml` from the current directory\n\
                  if present, then every file given with --config, in order.\n\
                  CLUSTERGIT_<SECTION>__<KEY> environment variables override\n\
                  files, and command line flags override everything.\n\n\
                  A directory containing a `.clustergit-ignore` file is skipped."
)]
pub struct Cli {
    /// Configuration and logging options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Scan, action and output options
    #[command(flatten)]
    pub scan: ScanArgs,
}

impl Cli {
    /// All configuration overrides given on the command line.
    #[must_use]
    pub fn config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = self.scan.to_config_overrides();
        overrides.extend(self.global.to_config_overrides());
        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
