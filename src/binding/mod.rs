//! Data binding: resolve each template variable to a concrete value.
//!
//! Values come from four kinds of source, one resolution function each:
//!
//! | source              | collaborator        | when missing                 |
//! |---------------------|---------------------|------------------------------|
//! | `record-field`      | [`RecordStore`]     | empty string                 |
//! | `narrative-section` | [`NarrativeSource`] | error for the whole document |
//! | `static-default`    | none                | n/a                          |
//! | `external-result`   | [`LabResults`]      | `defaultValue`, else `N/A`   |
//!
//! Narrative failures are never defaulted: the resolver returns an error
//! and no partial binding.

mod sources;

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::templates::{NarrativeSection, TemplateRegistry, VariableSource};

pub use sources::{JsonLabResults, JsonNarratives, JsonRecordStore};

/// Value of an `external-result` variable with no result and no default.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default upper bound on one narrative request.
pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(60);

/// Field values of one stored record.
pub type Record = serde_json::Map<String, Value>;

pub trait RecordStore: Send + Sync {
    fn get_record(&self, id: &str) -> Option<Record>;
}

/// Generated report prose, keyed by category and section.
#[async_trait]
pub trait NarrativeSource: Send + Sync {
    async fn get_narrative(
        &self,
        category: &str,
        section: NarrativeSection,
    ) -> Result<String, NarrativeError>;
}

pub trait LabResults: Send + Sync {
    fn get_lab_result(&self, key: &str) -> Option<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("no narrative for category \"{category}\" section '{section}'")]
    NotFound {
        category: String,
        section: NarrativeSection,
    },
    #[error("narrative service error: {0}")]
    Service(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no template configuration matches \"{0}\"")]
    UnknownTemplate(String),
    #[error("variable \"{variable}\": narrative section '{section}' failed: {source}")]
    Narrative {
        variable: String,
        section: NarrativeSection,
        #[source]
        source: NarrativeError,
    },
    #[error("variable \"{variable}\": narrative section '{section}' timed out after {}s", .timeout.as_secs())]
    NarrativeTimeout {
        variable: String,
        section: NarrativeSection,
        timeout: Duration,
    },
}

/// The collaborators a binding reads from.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub records: &'a dyn RecordStore,
    pub narratives: &'a dyn NarrativeSource,
    pub lab_results: &'a dyn LabResults,
}

#[derive(Debug, Clone, Default)]
pub struct BindRequest {
    /// Classification label; also the narrative category.
    pub template_type: String,
    pub record_id: Option<String>,
    /// Distinct variable names found in the document.
    pub document_variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    Value(String),
    /// Present in the document but not declared by its configuration.
    Unmapped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub template_type: String,
    pub template_pattern: String,
    /// Declared variables in configuration order, then unmapped ones in
    /// document order.
    pub values: IndexMap<String, Resolution>,
}

impl Binding {
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Resolution::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn unmapped(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, r)| matches!(r, Resolution::Unmapped))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

pub struct Resolver {
    registry: TemplateRegistry,
    narrative_timeout: Duration,
}

impl Resolver {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            narrative_timeout: DEFAULT_NARRATIVE_TIMEOUT,
        }
    }

    pub fn with_narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout = timeout;
        self
    }

    /// Resolve every variable declared for the request's template type.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::UnknownTemplate`] if no configuration matches.
    /// - [`ResolveError::Narrative`] / [`ResolveError::NarrativeTimeout`] if
    ///   any narrative section cannot be produced.
    pub async fn resolve(
        &self,
        request: &BindRequest,
        collaborators: Collaborators<'_>,
    ) -> Result<Binding, ResolveError> {
        let template = self
            .registry
            .find(&request.template_type)
            .ok_or_else(|| ResolveError::UnknownTemplate(request.template_type.clone()))?;

        let record = match request.record_id.as_deref() {
            Some(id) => {
                let record = collaborators.records.get_record(id);
                if record.is_none() {
                    tracing::debug!(record_id = id, "record not found, record fields resolve empty");
                }
                record
            }
            None => None,
        };

        let mut values = IndexMap::new();

        for (name, descriptor) in &template.variables {
            let value = match &descriptor.source {
                VariableSource::RecordField { record_field } => {
                    resolve_record_field(record.as_ref(), record_field)
                }
                VariableSource::NarrativeSection { narrative_section } => {
                    self.resolve_narrative(
                        name,
                        &request.template_type,
                        *narrative_section,
                        collaborators.narratives,
                    )
                    .await?
                }
                VariableSource::StaticDefault { default_value } => default_value.clone(),
                VariableSource::ExternalResult {
                    result_key,
                    default_value,
                } => resolve_external_result(
                    result_key.as_deref().unwrap_or(name),
                    default_value.as_deref(),
                    collaborators.lab_results,
                ),
            };
            values.insert(name.clone(), Resolution::Value(value));
        }

        for name in &request.document_variables {
            if !template.variables.contains_key(name) {
                tracing::debug!(variable = %name, template = %template.template_pattern, "unmapped variable");
                values.insert(name.clone(), Resolution::Unmapped);
            }
        }

        Ok(Binding {
            template_type: request.template_type.clone(),
            template_pattern: template.template_pattern.clone(),
            values,
        })
    }

    async fn resolve_narrative(
        &self,
        variable: &str,
        category: &str,
        section: NarrativeSection,
        narratives: &dyn NarrativeSource,
    ) -> Result<String, ResolveError> {
        match tokio::time::timeout(
            self.narrative_timeout,
            narratives.get_narrative(category, section),
        )
        .await
        {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(source)) => Err(ResolveError::Narrative {
                variable: variable.to_string(),
                section,
                source,
            }),
            Err(_) => Err(ResolveError::NarrativeTimeout {
                variable: variable.to_string(),
                section,
                timeout: self.narrative_timeout,
            }),
        }
    }
}

fn resolve_record_field(record: Option<&Record>, field: &str) -> String {
    match record.and_then(|r| r.get(field)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn resolve_external_result(
    key: &str,
    default_value: Option<&str>,
    lab_results: &dyn LabResults,
) -> String {
    lab_results
        .get_lab_result(key)
        .or_else(|| default_value.map(String::from))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
