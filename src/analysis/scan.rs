//! Offset scans over the raw main-part markup.
//!
//! Both scans work on the undecoded XML text so that their offsets live in
//! the same coordinate space and can be joined by position.

use std::sync::LazyLock;

use regex::Regex;

/// `{name}` where name is one or more ASCII letters, digits or underscores.
pub static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

/// Start marker of a comment range, e.g. `<w:commentRangeStart w:id="3"/>`.
static COMMENT_RANGE_START_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<w:commentRangeStart\b[^>]*?\bw:id="(\d+)""#).unwrap()
});

/// A placeholder found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableOccurrence {
    pub name: String,
    /// Byte offset of the opening `{`.
    pub position: usize,
}

/// Where a comment's anchored range begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPosition {
    pub id: String,
    /// Byte offset of the start marker.
    pub position: usize,
}

/// Find every placeholder occurrence in scan order.
///
/// Unbalanced braces or names with other characters simply do not match.
pub fn scan_variables(markup: &str) -> Vec<VariableOccurrence> {
    PLACEHOLDER_REGEX
        .captures_iter(markup)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(VariableOccurrence {
                name: name.as_str().to_string(),
                position: whole.start(),
            })
        })
        .collect()
}

/// Find every comment-range start marker in scan order.
pub fn scan_comment_positions(markup: &str) -> Vec<CommentPosition> {
    COMMENT_RANGE_START_REGEX
        .captures_iter(markup)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = caps.get(1)?;
            Some(CommentPosition {
                id: id.as_str().to_string(),
                position: whole.start(),
            })
        })
        .collect()
}
