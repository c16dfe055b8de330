//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Run i18n key checks, optionally fixing what can be fixed
//! - `init`: Initialize the `.i18n-check.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::rules::CheckRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read a project.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory; configured paths are relative to it
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Source directory to scan (overrides config file)
    #[arg(long)]
    pub src_dir: Option<String>,

    /// Directory holding the locale JSON files (overrides config file)
    #[arg(long)]
    pub i18n_dir: Option<String>,

    /// Source locale JSON file (overrides config file)
    #[arg(long)]
    pub i18n_src: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: every active check)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,

    /// Fix invalid keys, key order, alt texts and aria labels in place
    #[arg(long)]
    pub fix: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check i18n keys and values for consistency
    Check(CheckCommand),
    /// Initialize a new .i18n-check.json configuration file
    Init,
}
