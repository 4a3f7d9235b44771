//! Template analysis pipeline.
//!
//! ```text
//! package ──┬─ comments part ─→ comments ──────────────┐
//!           └─ main part ──┬─→ variable scan ──┬─→ associate ─→ TemplateAnalysis
//!                          ├─→ comment ranges ─┘
//!                          └─→ plain text ─→ context windows ─→ VariableMeanings
//! ```
//!
//! Every stage is a pure single pass over one document.

pub mod associate;
pub mod batch;
pub mod comments;
pub mod context;
pub mod document;
pub mod scan;

pub use associate::{NO_COMMENT_FOUND, VariableDescription, VariableDescriptions, associate};
pub use batch::{BatchEntry, BatchReport, DocumentOutcome, analyze_batch, build_report};
pub use comments::{Comments, extract_comments};
pub use context::{ContextEntry, VariableMeaning, VariableMeanings, analyze_contexts};
pub use document::{
    TemplateAnalysis, analyze_bytes, analyze_file, analyze_file_contexts, analyze_package,
    display_name,
};
pub use scan::{CommentPosition, VariableOccurrence, scan_comment_positions, scan_variables};
