use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{CommandResult, CommandSummary, OutputSummary};
use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    issues::{Issue, Severity},
};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    documents_checked: usize,
    skipped_count: usize,
) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    match summary {
        CommandSummary::Analyze(ref s) => error_count += s.failed_count,
        CommandSummary::Bind(ref s) if s.error.is_some() => error_count += 1,
        CommandSummary::Init(ref s) if s.error.is_some() => error_count += 1,
        _ => {}
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        documents_checked,
        skipped_count,
    }
}

/// Load `.docvarsrc.json` starting from `--config-root` or the working directory.
pub fn load_command_config(common: &CommonArgs) -> Result<Config> {
    let start_dir = match &common.config_root {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to read current directory")?,
    };
    let loaded = load_config(&start_dir)?;
    if !loaded.from_file {
        tracing::debug!(start_dir = %start_dir.display(), "no config file found, using defaults");
    }
    Ok(loaded.config)
}

/// Serialize `value` as pretty JSON, writing it to `path` when given.
pub fn write_output<T: Serialize>(
    value: &T,
    path: Option<&Path>,
    entry_count: usize,
) -> Result<OutputSummary> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;

    if let Some(path) = path {
        fs::write(path, format!("{}\n", json))
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    }

    Ok(OutputSummary {
        json,
        path: path.map(Path::to_path_buf),
        entry_count,
    })
}
