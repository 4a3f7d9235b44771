//! Report formatting and printing utilities.
//!
//! Diagnostics are printed in cargo style. JSON produced by a command goes
//! to stdout unchanged so it can be piped; everything else about a JSON
//! command goes to stderr.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    AnalyzeSummary, BindSummary, CommandResult, CommandSummary, DocumentLine, InitSummary,
    OutputSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(documents: usize) {
    print_success_to(documents, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(documents: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            documents,
            if documents == 1 {
                "template"
            } else {
                "templates"
            }
        )
        .green()
    );
}

/// Print a warning about inputs that could not be scanned.
pub fn print_skipped_warning(count: usize, verbose: bool) {
    print_skipped_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be scanned (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Print the batch listing: one aligned line per report key.
pub fn print_document_lines_to<W: Write>(lines: &[DocumentLine], writer: &mut W) {
    let key_width = lines
        .iter()
        .map(|l| UnicodeWidthStr::width(l.key.as_str()))
        .max()
        .unwrap_or(0);

    for line in lines {
        let padding = key_width - UnicodeWidthStr::width(line.key.as_str());
        let detail = match line.variable_count {
            Some(variables) => format!(
                "{} variable(s), {} comment(s)",
                variables, line.comment_count
            )
            .normal(),
            None => "unreadable".red(),
        };
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {}",
            line.key.bold(),
            "",
            detail,
            padding = padding
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file_path());

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "   {} {} {}",
            "=".blue(),
            "hint:".bold().cyan(),
            hint
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Analyze(summary) => print_analyze(summary, result.documents_checked),
        CommandSummary::Context(output) => print_output(output, "variable"),
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.documents_checked);
            }
        }
        CommandSummary::Bind(summary) => print_bind(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }

    print_skipped_warning(result.skipped_count, verbose);
}

/// JSON to stdout, or a confirmation line when it went to a file.
fn print_output(output: &OutputSummary, noun: &str) {
    match &output.path {
        None => println!("{}", output.json),
        Some(path) => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Wrote {} {}(s) to {}",
                output.entry_count,
                noun,
                path.display()
            )
            .green()
        ),
    }
}

fn print_analyze(summary: &AnalyzeSummary, documents_checked: usize) {
    print_output(&summary.output, "template");
    if summary.output.path.is_some() {
        print_document_lines_to(&summary.documents, &mut io::stdout().lock());
    }

    if documents_checked == 0 {
        eprintln!(
            "{} no .docx templates found",
            "warning:".bold().yellow()
        );
    }
    if summary.failed_count > 0 {
        eprintln!(
            "{} {} {} could not be read",
            "error:".bold().red(),
            summary.failed_count,
            if summary.failed_count == 1 {
                "document"
            } else {
                "documents"
            }
        );
    }
}

fn print_bind(summary: &BindSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
        return;
    }

    if let Some(output) = &summary.output {
        print_output(output, "variable");
    }

    if !summary.unmapped.is_empty() {
        eprintln!(
            "{} {} variable(s) not declared for {}: {}",
            "warning:".bold().yellow(),
            summary.unmapped.len(),
            summary.template_type,
            summary.unmapped.join(", ")
        );
    }
}

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
