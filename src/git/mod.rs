// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git module.
//!
//! ```text
//!   discovery.rs        candidate directories (ignore walker)
//!        |
//!        v
//!   runner.rs  ----->  git status  ----->  status.rs
//!   (CommandRunner)                        classify -> StatusReport
//!        |                                      |
//!        v                                      v
//!   ops.rs  <------------------------------  can_push / can_pull
//!   push / pull / fetch / exec / checkout
//!        |
//!        v
//!   Vec<OperationOutcome>
//! ```
//!
//! Everything here works from git's human-readable text; nothing reads the
//! object database.

pub mod discovery;
pub mod ops;
pub mod runner;
pub mod status;

#[cfg(test)]
pub(crate) mod scripted;
#[cfg(test)]
mod tests;
