//! Dispatches parsed arguments to the matching command handler.
//!
//! Returns the command's [`CommandResult`]; `Err` only for failures that
//! stop the command outright (bad config, unreadable input, I/O errors).

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{analyze::analyze, bind::bind, check::check, context::context, init::init},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Analyze(cmd)) => analyze(cmd),
        Some(Command::Context(cmd)) => context(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Bind(cmd)) => bind(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
