use anyhow::Result;

use super::{
    helper::{finish, load_command_config},
    {CommandResult, CommandSummary},
};
use crate::{
    analysis::{DocumentOutcome, TemplateAnalysis, analyze_batch},
    cli::args::{CheckCommand, CheckRule},
    file_scanner::scan_documents,
    issues::{
        ArchiveErrorIssue, Issue, UncommentedVariableIssue, UnknownTemplateIssue,
        UnmappedVariableIssue,
    },
    templates::TemplateRegistry,
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let config = load_command_config(&cmd.common)?;
    let registry = config.template_registry();

    let rules = if cmd.rules.is_empty() {
        CheckRule::all()
    } else {
        cmd.rules.clone()
    };

    let scan = scan_documents(&cmd.paths, &config.ignores, cmd.common.verbose);
    let outcomes = analyze_batch(&scan.files, &registry);

    let mut all_issues: Vec<Issue> = Vec::new();
    for outcome in &outcomes {
        all_issues.extend(document_issues(outcome, &registry, &rules));
    }

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        scan.files.len(),
        scan.skipped_count,
    ))
}

/// Issues for one document. Unreadable documents are always reported.
fn document_issues(
    outcome: &DocumentOutcome,
    registry: &TemplateRegistry,
    rules: &[CheckRule],
) -> Vec<Issue> {
    let file_path = outcome.path.display().to_string();

    let analysis = match &outcome.result {
        Ok(analysis) => analysis,
        Err(error) => {
            return vec![Issue::ArchiveError(ArchiveErrorIssue {
                file_path,
                error: error.clone(),
            })];
        }
    };

    let mut issues = Vec::new();
    for rule in rules {
        match rule {
            CheckRule::Unmapped | CheckRule::UnknownTemplate => {
                issues.extend(coverage_issues(
                    &file_path,
                    &outcome.template_type,
                    analysis,
                    registry,
                    *rule,
                ));
            }
            CheckRule::Uncommented => {
                issues.extend(
                    analysis
                        .variable_descriptions
                        .iter()
                        .filter(|(_, d)| d.comment_id.is_none())
                        .map(|(name, _)| {
                            Issue::UncommentedVariable(UncommentedVariableIssue {
                                file_path: file_path.clone(),
                                variable: name.clone(),
                            })
                        }),
                );
            }
        }
    }
    issues
}

fn coverage_issues(
    file_path: &str,
    template_type: &str,
    analysis: &TemplateAnalysis,
    registry: &TemplateRegistry,
    rule: CheckRule,
) -> Vec<Issue> {
    match (registry.find(template_type), rule) {
        (None, CheckRule::UnknownTemplate) if !analysis.variables.is_empty() => {
            vec![Issue::UnknownTemplate(UnknownTemplateIssue {
                file_path: file_path.to_string(),
                template_type: template_type.to_string(),
                variable_count: analysis.variables.len(),
            })]
        }
        (Some(template), CheckRule::Unmapped) => analysis
            .variables
            .iter()
            .filter(|name| !template.variables.contains_key(*name))
            .map(|name| {
                let comment = analysis
                    .variable_descriptions
                    .get(name)
                    .filter(|d| d.comment_id.is_some())
                    .map(|d| d.description.clone());
                Issue::UnmappedVariable(UnmappedVariableIssue {
                    file_path: file_path.to_string(),
                    template_type: template_type.to_string(),
                    variable: name.clone(),
                    comment,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}
