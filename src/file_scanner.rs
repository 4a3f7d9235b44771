use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Result of scanning for document packages.
pub struct ScanResult {
    /// Package paths, sorted and deduplicated.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect `.docx` packages from files and directories.
///
/// Files named explicitly are kept as long as they have a package extension.
/// Directories are walked recursively; entries matching an ignore glob are
/// skipped, as are Word lock files (`~$name.docx`).
pub fn scan_documents(inputs: &[PathBuf], ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => glob_patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }

    for input in inputs {
        if input.is_file() {
            if is_document_package(input) {
                files.insert(input.clone());
            } else if verbose {
                eprintln!(
                    "{} Not a .docx package, skipping: {}",
                    "warning:".bold().yellow(),
                    input.display()
                );
            }
            continue;
        }

        if !input.exists() {
            skipped_count += 1;
            if verbose {
                eprintln!(
                    "{} Path does not exist: {}",
                    "warning:".bold().yellow(),
                    input.display()
                );
            }
            continue;
        }

        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_document_package(path) && !is_lock_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    tracing::debug!(count = files.len(), skipped_count, "scanned for document packages");

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn is_document_package(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with("~$"))
}
