// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |                   scan
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, CLI layers   |
//!              '------+-------------+------'
//!                     |             |
//!                     v             v
//!                   scan  ----->  report
//!              per-repo loop    tags, sinks
//!                     |
//!                     v
//!                    git
//!      discovery / status / ops / runner
//!
//!   +-----------------------------------------+
//!   |  core   process spawning, output capture |
//!   +-----------------------------------------+
//!   |  foundation   error, logging             |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod report;
pub mod scan;
