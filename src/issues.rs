//! Issue types for template coverage checks.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it: the document it belongs to, a message, and optional notes.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ArchiveError,
    UnknownTemplate,
    UnmappedVariable,
    UncommentedVariable,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ArchiveError => write!(f, "archive-error"),
            Rule::UnknownTemplate => write!(f, "unknown-template"),
            Rule::UnmappedVariable => write!(f, "unmapped-variable"),
            Rule::UncommentedVariable => write!(f, "uncommented-variable"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Document package could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ArchiveErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ArchiveError
    }
}

/// No template configuration matches the document's template type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTemplateIssue {
    pub file_path: String,
    pub template_type: String,
    /// Number of distinct variables left without a binding.
    pub variable_count: usize,
}

impl UnknownTemplateIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownTemplate
    }
}

/// Variable used in a document but not declared by its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedVariableIssue {
    pub file_path: String,
    pub template_type: String,
    pub variable: String,
    /// Reviewer comment associated with the variable, if any.
    pub comment: Option<String>,
}

impl UnmappedVariableIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnmappedVariable
    }
}

/// Variable with no reviewer comment before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncommentedVariableIssue {
    pub file_path: String,
    pub variable: String,
}

impl UncommentedVariableIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UncommentedVariable
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ArchiveError(ArchiveErrorIssue),
    UnknownTemplate(UnknownTemplateIssue),
    UnmappedVariable(UnmappedVariableIssue),
    UncommentedVariable(UncommentedVariableIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    /// File, then rule, then message; variables keep a stable order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    /// Document the issue belongs to.
    fn file_path(&self) -> &str;

    /// Primary message to display (variable name, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ArchiveErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UnknownTemplateIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.template_type.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} variable(s) have no data source",
            self.variable_count
        ))
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "add a 'templates' entry whose templatePattern matches \"{}\"",
            self.template_type
        ))
    }
}

impl Report for UnmappedVariableIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.variable.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        match &self.comment {
            Some(comment) => Some(format!(
                "not declared for {} (comment: \"{}\")",
                self.template_type, comment
            )),
            None => Some(format!("not declared for {}", self.template_type)),
        }
    }
}

impl Report for UncommentedVariableIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.variable.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("add a reviewer comment just before the placeholder".to_string())
    }
}
