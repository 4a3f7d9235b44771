//! Plain-text context windows around placeholders.
//!
//! The main part is reduced to the text a reader would see, then every
//! placeholder in that text gets a window of preceding and following
//! characters. Windows are measured in characters so multi-byte text is
//! never split.

use std::sync::LazyLock;

use indexmap::IndexMap;
use quick_xml::{Reader, escape::unescape, events::Event};
use regex::Regex;
use serde::Serialize;

use super::scan::PLACEHOLDER_REGEX;

/// Characters captured before a placeholder.
pub const BEFORE_WINDOW: usize = 100;
/// Characters captured after a placeholder.
pub const AFTER_WINDOW: usize = 50;
/// Examples stored per variable name.
pub const MAX_EXAMPLES: usize = 3;
/// Stored examples keep this many trailing characters of `before`.
pub const STORED_BEFORE: usize = 80;
/// Stored examples keep this many leading characters of `after`.
pub const STORED_AFTER: usize = 30;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEntry {
    #[serde(skip)]
    pub variable: String,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableMeaning {
    pub occurrences: usize,
    pub contexts: Vec<ContextEntry>,
}

/// Variable name → meaning, in first-occurrence order.
pub type VariableMeanings = IndexMap<String, VariableMeaning>;

/// Reduce main-part markup to plain text.
///
/// Keeps only text-run contents. Paragraph ends, tabs and line breaks become
/// spaces, and whitespace runs collapse to one space.
pub fn strip_to_plain_text(markup: &str) -> String {
    let raw = match collect_run_text(markup) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "malformed document markup, stripping tags instead");
            let stripped = TAG_REGEX.replace_all(markup, " ");
            match unescape(&stripped) {
                Ok(text) => text.into_owned(),
                Err(_) => stripped.to_string(),
            }
        }
    };
    collapse_whitespace(&raw)
}

fn collect_run_text(markup: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push(' '),
                _ => {}
            },
            Event::Empty(e) => {
                if matches!(e.local_name().as_ref(), b"tab" | b"br" | b"cr" | b"p") {
                    text.push(' ');
                }
            }
            Event::Text(e) if in_text_run => text.push_str(&e.unescape()?),
            Event::CData(e) if in_text_run => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capture a context window around every placeholder in `plain_text`.
pub fn extract_context_entries(plain_text: &str) -> Vec<ContextEntry> {
    let chars: Vec<char> = plain_text.chars().collect();
    let mut entries = Vec::new();

    // Running byte → char index conversion; matches arrive in ascending order.
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(plain_text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        char_cursor += plain_text[byte_cursor..whole.start()].chars().count();
        byte_cursor = whole.start();

        let start = char_cursor;
        let len = whole.as_str().chars().count();
        let end = start + len;

        let before: String = chars[start.saturating_sub(BEFORE_WINDOW)..start]
            .iter()
            .collect();
        let after: String = chars[end..(end + AFTER_WINDOW).min(chars.len())]
            .iter()
            .collect();

        entries.push(ContextEntry {
            variable: name.as_str().to_string(),
            before: before.trim().to_string(),
            after: after.trim().to_string(),
        });
    }

    entries
}

/// Group context entries by variable name.
///
/// Every entry counts as an occurrence; only the first [`MAX_EXAMPLES`] are
/// stored, shortened to [`STORED_BEFORE`] / [`STORED_AFTER`] characters.
pub fn aggregate_contexts(entries: Vec<ContextEntry>) -> VariableMeanings {
    let mut meanings = VariableMeanings::new();

    for entry in entries {
        let meaning = meanings.entry(entry.variable.clone()).or_default();
        meaning.occurrences += 1;
        if meaning.contexts.len() < MAX_EXAMPLES {
            meaning.contexts.push(ContextEntry {
                before: last_chars(&entry.before, STORED_BEFORE),
                after: first_chars(&entry.after, STORED_AFTER),
                variable: entry.variable,
            });
        }
    }

    meanings
}

/// Full context analysis of raw main-part markup.
pub fn analyze_contexts(markup: &str) -> VariableMeanings {
    let plain = strip_to_plain_text(markup);
    aggregate_contexts(extract_context_entries(&plain))
}

fn last_chars(text: &str, n: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(n)).collect()
}

fn first_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}
