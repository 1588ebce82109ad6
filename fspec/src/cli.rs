// src/cli.rs
use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::env;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{load_config, load_config_file};
use crate::core::dirs::LocalDirs;
use crate::core::enumerator::Enumerator;
use crate::tools::{CountTool, DeleteTool, ListTool, TouchTool, run_tool};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run a file tool over wildcard, indirect (@file) and recursive file specs",
    long_about = None,
    disable_help_flag = true,
    after_help = "Legacy switches go among the specs: -q quiet, -i ignore errors, -h hidden, \
                  -y system, -d directories, -s subdirectories, -e<path> default path, -? tool usage."
)]
pub struct Args {
    /// Tool to run over the matched files
    #[arg(value_enum)]
    pub tool: Tool,

    /// Read option defaults from this file instead of the nearest .fspec.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log how each spec is expanded
    #[arg(long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// File specs, @lists and switches, in order
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "SPEC")]
    pub specs: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Print size, time and path of each match (-b: paths only)
    List,
    /// Set modification times (-d<mm/dd/yyyy>, -t<hh:mm[:ss]>, -r read-only too)
    Touch,
    /// Delete matches (-p no prompt, -a read-only too, -r directories too, -q quietly)
    Delete,
    /// Count lines, words and bytes
    Count,
}

/// Runs the chosen tool over the real file system, writing to stdout.
///
/// Option defaults come from the tool, then from `--config` or the nearest
/// `.fspec.toml`, then from the switches among the specs.
///
/// # Returns
///
/// * `Ok(n)` - the number of entries the tool processed
///
/// # Errors
///
/// Fails on a bad configuration file, a hard enumeration error, or a tool
/// failure outside permissive mode.
pub fn run(args: &Args, program: &str) -> Result<usize> {
    let config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&env::current_dir().context("Cannot determine the current directory")?)?,
    };
    let mut options = args.tool.default_options();
    config.apply(&mut options);
    debug!(tool = ?args.tool, ?options, "starting");

    let mut enumerator = Enumerator::new(LocalDirs::new())
        .with_options(options)
        .with_program(program);
    let out = io::stdout().lock();
    let processed = match args.tool {
        Tool::List => run_tool(&mut enumerator, &mut ListTool::new(out), &args.specs)?,
        Tool::Touch => run_tool(&mut enumerator, &mut TouchTool::new(out), &args.specs)?,
        Tool::Delete => {
            let mut tool = DeleteTool::new(out, BufReader::new(io::stdin()));
            run_tool(&mut enumerator, &mut tool, &args.specs)?
        }
        Tool::Count => run_tool(&mut enumerator, &mut CountTool::new(out, io::stdin()), &args.specs)?,
    };
    debug!(processed, warnings = enumerator.warnings(), "done");
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_legacy_switches_pass_through() -> Result<()> {
        let args = Args::try_parse_from(["fspec", "list", "-s", "-h", "*.txt", "@list"])?;
        assert_eq!(args.tool, Tool::List);
        assert_eq!(args.specs, ["-s", "-h", "*.txt", "@list"]);
        Ok(())
    }

    #[test]
    fn test_own_flags_before_tool() -> Result<()> {
        let args = Args::try_parse_from(["fspec", "--verbose", "--config", "x.toml", "count", "a.txt"])?;
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert_eq!(args.tool, Tool::Count);
        assert_eq!(args.specs, ["a.txt"]);
        Ok(())
    }

    #[test]
    fn test_unknown_tool_rejected() {
        assert!(Args::try_parse_from(["fspec", "frobnicate", "x"]).is_err());
    }
}
