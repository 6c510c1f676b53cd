//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;
use crate::script::Step;

/// Drive a poolkit memory pool and a list stored inside it
#[derive(Debug, Parser)]
#[command(name = "poolkit", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every subcommand
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (defaults to ./poolkit.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pool size in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    pub capacity: Option<usize>,

    /// What a zero-byte allocation does
    #[arg(long, global = true, value_parser = ["reject", "peek"])]
    pub zero_size: Option<String>,

    /// Cap on descriptor metadata as a fraction of capacity, in (0, 1]
    #[arg(long, global = true, value_name = "FRACTION")]
    pub metadata_limit: Option<f64>,

    /// Log filter, e.g. `debug` or `poolkit_memory=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_parser = ["pretty", "compact", "json"])]
    pub log_format: Option<String>,
}

impl GlobalArgs {
    /// Flag values as the top configuration layer
    pub fn overrides(&self) -> Overrides {
        Overrides {
            capacity: self.capacity,
            zero_size: self.zero_size.clone(),
            metadata_limit: self.metadata_limit,
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run steps in order against one fresh pool and list
    ///
    /// Steps: insert:V, after:ANCHOR:V, before:ANCHOR:V, delete:V, search:V,
    /// count, values, alloc:BYTES, free:OFFSET, status, teardown.
    /// A failing step prints `error: <code> <message>` and the script goes on.
    Run {
        #[arg(required = true, value_name = "STEP", value_parser = clap::value_parser!(Step))]
        steps: Vec<Step>,
    },

    /// Print the block report of a freshly initialized pool
    Status,

    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["poolkit", "run", "insert:1", "count", "--capacity", "128"]).unwrap();
        assert_eq!(cli.global.capacity, Some(128));
        match cli.command {
            Command::Run { steps } => assert_eq!(steps, vec![Step::Insert(1), Step::Count]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_bad_step_is_a_usage_error() {
        assert!(Cli::try_parse_from(["poolkit", "run", "insert:x"]).is_err());
        assert!(Cli::try_parse_from(["poolkit", "run"]).is_err());
    }
}
