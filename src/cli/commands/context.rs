use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, write_output},
};
use crate::{analysis::analyze_file_contexts, cli::args::ContextCommand};

pub fn context(cmd: ContextCommand) -> Result<CommandResult> {
    let meanings = analyze_file_contexts(&cmd.file)?;
    let output = write_output(&meanings, cmd.output.as_deref(), meanings.len())?;

    Ok(finish(CommandSummary::Context(output), Vec::new(), 1, 0))
}
