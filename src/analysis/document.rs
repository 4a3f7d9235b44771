//! Per-document analysis: one structured report per template.

use std::path::Path;

use anyhow::Result;
use indexmap::IndexSet;
use serde::Serialize;

use super::{
    associate::{VariableDescriptions, associate},
    comments::{Comments, extract_comments},
    context::{VariableMeanings, analyze_contexts},
    scan::{scan_comment_positions, scan_variables},
};
use crate::package::{COMMENTS_PART, DocumentPackage, MAIN_DOCUMENT_PART};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAnalysis {
    pub filename: String,
    /// Raw placeholder matches, duplicates included.
    pub total_variables: usize,
    pub total_comments: usize,
    /// Distinct variable names in first-occurrence order.
    pub variables: Vec<String>,
    pub variable_descriptions: VariableDescriptions,
    pub all_comments: Comments,
}

/// Analyze an opened package.
///
/// Missing parts are not errors: a document without a comments part simply
/// has no comments, and one without a main part has no variables.
pub fn analyze_package(package: &mut DocumentPackage, filename: &str) -> TemplateAnalysis {
    let markup = package.read_part(MAIN_DOCUMENT_PART).unwrap_or_default();
    let comments_xml = package.read_part(COMMENTS_PART);

    let all_comments = extract_comments(comments_xml.as_deref());
    let occurrences = scan_variables(&markup);
    let positions = scan_comment_positions(&markup);
    let variable_descriptions = associate(&occurrences, &positions, &all_comments);

    let variables: IndexSet<&str> = occurrences.iter().map(|o| o.name.as_str()).collect();

    tracing::debug!(
        filename,
        occurrences = occurrences.len(),
        variables = variables.len(),
        comments = all_comments.len(),
        comment_ranges = positions.len(),
        "analyzed document"
    );

    TemplateAnalysis {
        filename: filename.to_string(),
        total_variables: occurrences.len(),
        total_comments: all_comments.len(),
        variables: variables.into_iter().map(String::from).collect(),
        variable_descriptions,
        all_comments,
    }
}

/// Open and analyze a package from raw bytes.
pub fn analyze_bytes(bytes: Vec<u8>, filename: &str) -> Result<TemplateAnalysis> {
    let mut package = DocumentPackage::open(bytes)?;
    Ok(analyze_package(&mut package, filename))
}

/// Open and analyze a package on disk.
pub fn analyze_file(path: &Path) -> Result<TemplateAnalysis> {
    let mut package = DocumentPackage::open_path(path)?;
    Ok(analyze_package(&mut package, &display_name(path)))
}

/// Context windows for every variable of a package on disk.
pub fn analyze_file_contexts(path: &Path) -> Result<VariableMeanings> {
    let mut package = DocumentPackage::open_path(path)?;
    let markup = package.read_part(MAIN_DOCUMENT_PART).unwrap_or_default();
    Ok(analyze_contexts(&markup))
}

/// File name component used in reports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
