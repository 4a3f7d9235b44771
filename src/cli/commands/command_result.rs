use std::path::PathBuf;

use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Analyze(AnalyzeSummary),
    Context(OutputSummary),
    Check,
    Bind(BindSummary),
    Init(InitSummary),
}

/// Serialized JSON produced by a command.
#[derive(Debug)]
pub struct OutputSummary {
    pub json: String,
    /// File the JSON was written to; `None` means stdout.
    pub path: Option<PathBuf>,
    /// Number of top-level entries in the JSON object.
    pub entry_count: usize,
}

#[derive(Debug)]
pub struct AnalyzeSummary {
    pub output: OutputSummary,
    pub documents: Vec<DocumentLine>,
    /// Documents reported as `"ERROR: ..."`.
    pub failed_count: usize,
}

/// One batch report entry, for the human-readable listing.
#[derive(Debug)]
pub struct DocumentLine {
    pub key: String,
    /// Distinct variables, or `None` if the document could not be read.
    pub variable_count: Option<usize>,
    pub comment_count: usize,
}

#[derive(Debug)]
pub struct BindSummary {
    pub template_type: String,
    /// Present when resolution succeeded.
    pub output: Option<OutputSummary>,
    pub unmapped: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running a docvars command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Issues found by `check`; empty for other commands.
    pub issues: Vec<Issue>,
    /// Number of documents that were analyzed.
    pub documents_checked: usize,
    /// Inputs that could not be scanned (missing paths, unreadable entries).
    pub skipped_count: usize,
}
