//! Docvars - template variable extraction and data binding for report templates
//!
//! Docvars reads `.docx` report templates, finds their `{placeholder}`
//! variables and reviewer comments, links each variable to the nearest
//! preceding comment, and resolves variables to values from work-order
//! records, generated narratives, and laboratory results.
//!
//! ## Module Structure
//!
//! - `analysis`: Extraction pipeline (comments, variables, contexts, batches)
//! - `binding`: Variable-to-value resolution against data collaborators
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `file_scanner`: Template discovery on disk
//! - `issues`: Issue type definitions for coverage checks
//! - `package`: Read access to `.docx` packages
//! - `templates`: Declarative template configuration table

pub mod analysis;
pub mod binding;
pub mod cli;
pub mod config;
pub mod file_scanner;
pub mod issues;
pub mod package;
pub mod templates;
