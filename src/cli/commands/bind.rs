use std::path::Path;

use anyhow::{Context, Result};

use super::{
    BindSummary, CommandResult, CommandSummary,
    helper::{finish, load_command_config, write_output},
};
use crate::{
    analysis::analyze_file,
    binding::{
        BindRequest, Collaborators, JsonLabResults, JsonNarratives, JsonRecordStore, Resolver,
    },
    cli::args::BindCommand,
};

pub fn bind(cmd: BindCommand) -> Result<CommandResult> {
    let config = load_command_config(&cmd.common)?;
    let registry = config.template_registry();

    let analysis = analyze_file(&cmd.file)?;
    let template_type = cmd
        .template_type
        .clone()
        .unwrap_or_else(|| registry.classify(&analysis.filename));

    let records = load_or_default(cmd.records.as_deref(), JsonRecordStore::load)?;
    let narratives = load_or_default(cmd.narratives.as_deref(), JsonNarratives::load)?;
    let lab_results = load_or_default(cmd.lab_results.as_deref(), JsonLabResults::load)?;

    let request = BindRequest {
        template_type: template_type.clone(),
        record_id: cmd.record_id.clone(),
        document_variables: analysis.variables,
    };
    let collaborators = Collaborators {
        records: &records,
        narratives: &narratives,
        lab_results: &lab_results,
    };
    let resolver = Resolver::new(registry).with_narrative_timeout(config.narrative_timeout());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let resolved = runtime.block_on(resolver.resolve(&request, collaborators));

    let summary = match resolved {
        Ok(binding) => BindSummary {
            template_type,
            output: Some(write_output(
                &binding,
                cmd.output.as_deref(),
                binding.values.len(),
            )?),
            unmapped: binding.unmapped().into_iter().map(String::from).collect(),
            error: None,
        },
        Err(err) => {
            tracing::debug!(error = ?err, "binding failed");
            BindSummary {
                template_type,
                output: None,
                unmapped: Vec::new(),
                error: Some(err.to_string()),
            }
        }
    };

    Ok(finish(CommandSummary::Bind(summary), Vec::new(), 1, 0))
}

fn load_or_default<T: Default>(
    path: Option<&Path>,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    match path {
        Some(path) => load(path),
        None => Ok(T::default()),
    }
}
