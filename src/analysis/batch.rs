//! Batch analysis over many templates.
//!
//! Documents are independent, so they are analyzed in parallel. Results are
//! gathered first and only then written into the report, in input order, so
//! the output does not depend on scheduling.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use super::document::{TemplateAnalysis, analyze_file, display_name};
use crate::templates::TemplateRegistry;

/// Outcome of analyzing one document.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub template_type: String,
    pub result: Result<TemplateAnalysis, String>,
}

/// A report value: the analysis, or `"ERROR: <message>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Analyzed(TemplateAnalysis),
    Failed(String),
}

/// Batch output keyed by template type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    pub entries: IndexMap<String, BatchEntry>,
}

impl BatchReport {
    pub fn error_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e, BatchEntry::Failed(_)))
            .count()
    }
}

/// Analyze every file; a failing document never stops the others.
pub fn analyze_batch(files: &[PathBuf], registry: &TemplateRegistry) -> Vec<DocumentOutcome> {
    files
        .par_iter()
        .map(|path| analyze_one(path, registry))
        .collect()
}

fn analyze_one(path: &Path, registry: &TemplateRegistry) -> DocumentOutcome {
    let template_type = registry.classify(&display_name(path));
    let result = analyze_file(path).map_err(|err| {
        tracing::warn!(path = %path.display(), error = %err, "document analysis failed");
        format!("{:#}", err)
    });

    DocumentOutcome {
        path: path.to_path_buf(),
        template_type,
        result,
    }
}

/// Assemble the keyed report.
///
/// When several documents share a template type, later ones are keyed
/// `TYPE (2)`, `TYPE (3)`, ...
pub fn build_report(outcomes: Vec<DocumentOutcome>) -> BatchReport {
    let mut entries = IndexMap::new();

    for outcome in outcomes {
        let key = unique_key(&entries, &outcome.template_type);
        let entry = match outcome.result {
            Ok(analysis) => BatchEntry::Analyzed(analysis),
            Err(message) => BatchEntry::Failed(format!("ERROR: {}", message)),
        };
        entries.insert(key, entry);
    }

    BatchReport { entries }
}

fn unique_key(entries: &IndexMap<String, BatchEntry>, template_type: &str) -> String {
    if !entries.contains_key(template_type) {
        return template_type.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", template_type, n))
        .find(|key| !entries.contains_key(key))
        .unwrap_or_else(|| template_type.to_string())
}
