use anyhow::Result;

use super::{
    AnalyzeSummary, CommandResult, CommandSummary, DocumentLine,
    helper::{finish, load_command_config, write_output},
};
use crate::{
    analysis::{BatchEntry, BatchReport, analyze_batch, build_report},
    cli::args::AnalyzeCommand,
    file_scanner::scan_documents,
};

pub fn analyze(cmd: AnalyzeCommand) -> Result<CommandResult> {
    let config = load_command_config(&cmd.common)?;
    let registry = config.template_registry();

    let scan = scan_documents(&cmd.paths, &config.ignores, cmd.common.verbose);
    let report = build_report(analyze_batch(&scan.files, &registry));
    tracing::debug!(
        documents = scan.files.len(),
        failed = report.error_count(),
        "batch analysis finished"
    );

    let output = write_output(&report, cmd.output.as_deref(), report.entries.len())?;
    let summary = CommandSummary::Analyze(AnalyzeSummary {
        output,
        documents: document_lines(&report),
        failed_count: report.error_count(),
    });

    Ok(finish(
        summary,
        Vec::new(),
        scan.files.len(),
        scan.skipped_count,
    ))
}

fn document_lines(report: &BatchReport) -> Vec<DocumentLine> {
    report
        .entries
        .iter()
        .map(|(key, entry)| match entry {
            BatchEntry::Analyzed(analysis) => DocumentLine {
                key: key.clone(),
                variable_count: Some(analysis.variables.len()),
                comment_count: analysis.total_comments,
            },
            BatchEntry::Failed(_) => DocumentLine {
                key: key.clone(),
                variable_count: None,
                comment_count: 0,
            },
        })
        .collect()
}
