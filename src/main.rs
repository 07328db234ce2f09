// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (layered) --> Logging --> run_scan_command
//!                                                      |
//!                 Ctrl-C --> CancellationToken --------'
//!
//! exit: 0 ok | 1 error | 130 interrupted
//! ```

use std::process::ExitCode;

use clustergit_rs::cli::{self, Cli};
use clustergit_rs::cmd::scan::run_scan_command;
use clustergit_rs::config::loader::ConfigLoader;
use clustergit_rs::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use clustergit_rs::error::{GitError, Result};
use clustergit_rs::logging::{LogConfig, init_logging};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Conventional status for termination by SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, loaded_files) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = LogConfig::for_scan(&config.log, config.output.verbose, config.output.colors);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    for line in &loaded_files {
        debug!(source = %line, "config loaded");
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    match run_scan_command(&config, cancel).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<GitError>(), Some(GitError::Interrupted)) => {
            println!();
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            cancel.cancel();
        }
    });
}

fn build_config_loader(cli: &Cli) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !cli.global.no_default_config {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in cli.config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn load_config(cli: &Cli) -> Result<(Config, Vec<String>)> {
    let loader = build_config_loader(cli)?;
    let files = loader.format_loaded_files();
    let config = loader.build()?;
    Ok((config, files))
}
