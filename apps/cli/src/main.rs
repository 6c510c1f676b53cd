//! `poolkit` command-line driver

mod cli;
mod config;
mod script;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use poolkit_memory::PoolAllocator;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::script::Session;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.global.config.as_deref(), &cli.global.overrides())?;
    let _guard = poolkit_log::init_with(config.log_config()).context("failed to start logging")?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Run { steps } => {
            let mut session = Session::start(config.capacity, config.pool_config())?;
            let mut failures = 0usize;
            for step in steps {
                match session.execute(step) {
                    Ok(line) => println!("{line}"),
                    Err(error) => {
                        let error = poolkit_log::log_error!(error, %step, "step failed");
                        failures += 1;
                        println!("error: {} {error}", error.code());
                    }
                }
            }
            Ok(if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Status => {
            let pool = PoolAllocator::with_config(config.capacity, config.pool_config())?;
            print!("{}", pool.status()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
