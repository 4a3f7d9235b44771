//! Collaborators backed by JSON files, for command-line use.
//!
//! ```json
//! // records:     { "<record id>": { "<field>": <value>, ... }, ... }
//! // narratives:  { "<category>": { "intro": "...", "results": "..." }, ... }
//! // lab results: { "<key>": <value>, ... }
//! ```

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{LabResults, NarrativeError, NarrativeSource, Record, RecordStore};
use crate::templates::NarrativeSection;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

#[derive(Debug, Default)]
pub struct JsonRecordStore {
    records: HashMap<String, Record>,
}

impl JsonRecordStore {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            records: read_json(path)?,
        })
    }
}

impl RecordStore for JsonRecordStore {
    fn get_record(&self, id: &str) -> Option<Record> {
        self.records.get(id).cloned()
    }
}

/// Pre-generated narrative sections.
///
/// Categories are matched exactly first, then case-insensitively. A missing
/// section is a [`NarrativeError::NotFound`], never an empty string.
#[derive(Debug, Default)]
pub struct JsonNarratives {
    sections: HashMap<String, HashMap<NarrativeSection, String>>,
}

impl JsonNarratives {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            sections: read_json(path)?,
        })
    }

    fn category(&self, category: &str) -> Option<&HashMap<NarrativeSection, String>> {
        self.sections.get(category).or_else(|| {
            self.sections
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(category))
                .map(|(_, sections)| sections)
        })
    }
}

#[async_trait]
impl NarrativeSource for JsonNarratives {
    async fn get_narrative(
        &self,
        category: &str,
        section: NarrativeSection,
    ) -> Result<String, NarrativeError> {
        self.category(category)
            .and_then(|sections| sections.get(&section))
            .cloned()
            .ok_or_else(|| NarrativeError::NotFound {
                category: category.to_string(),
                section,
            })
    }
}

#[derive(Debug, Default)]
pub struct JsonLabResults {
    results: HashMap<String, Value>,
}

impl JsonLabResults {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            results: read_json(path)?,
        })
    }
}

impl LabResults for JsonLabResults {
    fn get_lab_result(&self, key: &str) -> Option<String> {
        match self.results.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
