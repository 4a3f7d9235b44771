//! Nearest-preceding-comment association.
//!
//! The package format has no link from a placeholder to the reviewer comment
//! that explains it. Authors place the comment right before the placeholder,
//! so each variable takes the closest comment whose range starts strictly
//! before it.

use indexmap::IndexMap;
use serde::Serialize;

use super::{
    comments::Comments,
    scan::{CommentPosition, VariableOccurrence},
};

/// Description used when no comment precedes a variable.
pub const NO_COMMENT_FOUND: &str = "No comment found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDescription {
    pub description: String,
    pub comment_id: Option<String>,
}

impl VariableDescription {
    fn unassociated() -> Self {
        Self {
            description: NO_COMMENT_FOUND.to_string(),
            comment_id: None,
        }
    }
}

/// Variable name → description, in first-occurrence order.
pub type VariableDescriptions = IndexMap<String, VariableDescription>;

/// Associate every occurrence with its nearest preceding comment.
///
/// Both inputs must be in scan order (ascending offsets). When a name occurs
/// several times, the association of the last occurrence is kept.
pub fn associate(
    occurrences: &[VariableOccurrence],
    positions: &[CommentPosition],
    comments: &Comments,
) -> VariableDescriptions {
    let mut descriptions = VariableDescriptions::new();

    // Index of the first comment position not strictly before the variable.
    let mut next = 0;
    for occurrence in occurrences {
        while next < positions.len() && positions[next].position < occurrence.position {
            next += 1;
        }

        let description = next
            .checked_sub(1)
            .map(|idx| &positions[idx])
            .and_then(|nearest| {
                comments.get(&nearest.id).map(|text| VariableDescription {
                    description: text.clone(),
                    comment_id: Some(nearest.id.clone()),
                })
            })
            .unwrap_or_else(VariableDescription::unassociated);

        descriptions.insert(occurrence.name.clone(), description);
    }

    descriptions
}
