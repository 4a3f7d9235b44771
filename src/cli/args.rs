//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Extract variables and comments from templates (JSON batch report)
//! - `context`: Show the text around each variable of one template
//! - `check`: Report variables the template configuration does not cover
//! - `bind`: Resolve a template's variables against data files
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

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
            Some(Command::Analyze(cmd)) => cmd.common.verbose,
            Some(Command::Context(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Bind(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to start searching for the config file (default: current directory)
    #[arg(long)]
    pub config_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Template files or directories to scan
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ContextCommand {
    /// Template file to inspect
    pub file: PathBuf,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Unmapped,
    UnknownTemplate,
    Uncommented,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::Unmapped,
            CheckRule::UnknownTemplate,
            CheckRule::Uncommented,
        ]
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Template files or directories to scan
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Rules to check (default: all)
    /// Can be specified multiple times: --rule unmapped --rule uncommented
    #[arg(long = "rule", value_enum)]
    pub rules: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct BindCommand {
    /// Template file whose variables are resolved
    pub file: PathBuf,

    /// Template type (default: inferred from the file name)
    #[arg(long)]
    pub template_type: Option<String>,

    /// Identifier of the work-order record
    #[arg(long)]
    pub record_id: Option<String>,

    /// JSON file of records keyed by id
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// JSON file of narrative sections keyed by category
    #[arg(long)]
    pub narratives: Option<PathBuf>,

    /// JSON file of laboratory results keyed by result key
    #[arg(long)]
    pub lab_results: Option<PathBuf>,

    /// Write the JSON binding to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract variables and reviewer comments from templates
    Analyze(AnalyzeCommand),
    /// Show the surrounding text of each variable in a template
    Context(ContextCommand),
    /// Report variables not covered by the template configuration
    Check(CheckCommand),
    /// Resolve a template's variables to values
    Bind(BindCommand),
    /// Initialize a new .docvarsrc.json configuration file
    Init,
}
