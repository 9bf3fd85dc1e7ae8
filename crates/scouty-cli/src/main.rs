// scouty entry point.
//
// Startup sequence:
// 1. Parse arguments (usage errors exit 1, help and version exit 0)
// 2. Load config
// 3. Initialize tracing (stderr, stdout is for reports)
// 4. Run the command and map failures to an exit code

use anyhow::Context;
use clap::Parser;
use scouty_cli::cli::Cli;
use scouty_cli::{commands, exit_code, logging, usage_exit_code};
use scouty_core::config;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e) as u8);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            // exit_code is 1 or 130, both fit in a u8
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config =
        config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init_tracing(cli.verbosity, config.logging.filter.as_deref())?;
    debug!("config: {:?}", config);

    commands::run(cli.command, &config)
}
