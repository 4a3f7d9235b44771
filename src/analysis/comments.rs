//! Reviewer comment extraction from the comments part.
//!
//! A comment element looks like:
//!
//! ```xml
//! <w:comment w:id="3" w:author="...">
//!   <w:p><w:r><w:t>Nombre del cliente</w:t></w:r></w:p>
//!   <w:p><w:r><w:t>tal como aparece en la OIT</w:t></w:r></w:p>
//! </w:comment>
//! ```
//!
//! Every text run inside a comment contributes one fragment; fragments are
//! joined with a single space and the result is trimmed.

use indexmap::IndexMap;
use quick_xml::{Reader, events::Event};

/// Comment id → comment text, in document order.
pub type Comments = IndexMap<String, String>;

/// Extract all comments from the comments part.
///
/// `None` (no comments part) yields an empty mapping. Malformed XML stops
/// the scan and keeps whatever was collected up to that point.
pub fn extract_comments(comments_xml: Option<&str>) -> Comments {
    let Some(xml) = comments_xml else {
        return Comments::new();
    };

    let mut comments = Comments::new();
    let mut reader = Reader::from_str(xml);

    // (id, text fragments) of the comment currently open
    let mut current: Option<(String, Vec<String>)> = None;
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"comment" => {
                    let id = comment_id(&e);
                    current = Some((id, Vec::new()));
                }
                b"t" if current.is_some() => {
                    in_text_run = true;
                    if let Some((_, fragments)) = current.as_mut() {
                        fragments.push(String::new());
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"comment" => {
                    comments.insert(comment_id(&e), String::new());
                }
                b"t" => {
                    if let Some((_, fragments)) = current.as_mut() {
                        fragments.push(String::new());
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let text = match e.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(_) => String::from_utf8_lossy(&e).into_owned(),
                };
                push_text(&mut current, &text);
            }
            Ok(Event::CData(e)) if in_text_run => {
                let text = String::from_utf8_lossy(&e).into_owned();
                push_text(&mut current, &text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"comment" => {
                    if let Some((id, fragments)) = current.take() {
                        comments.insert(id, fragments.join(" ").trim().to_string());
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                tracing::warn!(
                    position = reader.buffer_position(),
                    error = %err,
                    "malformed comments part, keeping comments parsed so far"
                );
                break;
            }
            _ => {}
        }
    }

    comments
}

fn comment_id(element: &quick_xml::events::BytesStart<'_>) -> String {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
        .unwrap_or_default()
}

fn push_text(current: &mut Option<(String, Vec<String>)>, text: &str) {
    if let Some((_, fragments)) = current.as_mut()
        && let Some(last) = fragments.last_mut()
    {
        last.push_str(text);
    }
}
