//! Template configuration: which data source feeds each placeholder.
//!
//! The table maps a template type (e.g. `CALIDAD DE AIRE`) to the variables
//! its documents declare and where each value comes from. It is plain data:
//! a built-in table is embedded in the binary and parsed once, and a project
//! can replace it through the `templates` key of its config file.

use std::{
    fmt,
    marker::PhantomData,
    path::Path,
    sync::{Arc, LazyLock},
};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor},
};

const BUILTIN_TEMPLATES_JSON: &str = include_str!("builtin.json");

static BUILTIN_REGISTRY: LazyLock<TemplateRegistry> = LazyLock::new(|| {
    let templates: Vec<TemplateConfig> = serde_json::from_str(BUILTIN_TEMPLATES_JSON)
        .expect("built-in template table must be valid");
    TemplateRegistry::new(templates)
});

/// Report prose categories produced by the narrative generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSection {
    Intro,
    Methodology,
    Results,
    Conclusions,
}

impl fmt::Display for NarrativeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeSection::Intro => write!(f, "intro"),
            NarrativeSection::Methodology => write!(f, "methodology"),
            NarrativeSection::Results => write!(f, "results"),
            NarrativeSection::Conclusions => write!(f, "conclusions"),
        }
    }
}

/// Where a variable's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(
    tag = "source",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum VariableSource {
    /// A field of the record being reported on.
    RecordField { record_field: String },
    /// Generated prose for one report section.
    NarrativeSection { narrative_section: NarrativeSection },
    /// A fixed value.
    StaticDefault { default_value: String },
    /// A lab-results value; `result_key` defaults to the variable name.
    ExternalResult {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
}

impl VariableSource {
    pub fn kind(&self) -> &'static str {
        match self {
            VariableSource::RecordField { .. } => "record-field",
            VariableSource::NarrativeSection { .. } => "narrative-section",
            VariableSource::StaticDefault { .. } => "static-default",
            VariableSource::ExternalResult { .. } => "external-result",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariableDescriptor {
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub source: VariableSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Matched case-insensitively as a substring of the template type.
    pub template_pattern: String,
    #[serde(deserialize_with = "deserialize_unique_variables")]
    pub variables: IndexMap<String, VariableDescriptor>,
}

impl TemplateConfig {
    fn matches(&self, template_type: &str) -> bool {
        let pattern = normalize(&self.template_pattern);
        !pattern.is_empty() && normalize(template_type).contains(&pattern)
    }
}

/// Ordered, read-only set of template configurations.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Arc<[TemplateConfig]>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<TemplateConfig>) -> Self {
        Self {
            templates: templates.into(),
        }
    }

    /// The table embedded in the binary.
    pub fn builtin() -> Self {
        BUILTIN_REGISTRY.clone()
    }

    pub fn templates(&self) -> &[TemplateConfig] {
        &self.templates
    }

    /// First configuration, in declaration order, whose pattern matches.
    pub fn find(&self, template_type: &str) -> Option<&TemplateConfig> {
        self.templates.iter().find(|t| t.matches(template_type))
    }

    /// Infer a template type from a document file name.
    ///
    /// The file stem is compared against each pattern with `_` and `-` read
    /// as spaces. A match yields the configuration's pattern; otherwise the
    /// stem itself is the template type.
    pub fn classify(&self, filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);

        match self.find(stem) {
            Some(template) => template.template_pattern.clone(),
            None => stem.to_string(),
        }
    }

    /// Patterns declared more than once; later duplicates can never match.
    pub fn duplicate_patterns(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut duplicates = Vec::new();
        for template in self.templates.iter() {
            let pattern = normalize(&template.template_pattern);
            if seen.contains(&pattern) {
                if !duplicates.contains(&template.template_pattern) {
                    duplicates.push(template.template_pattern.clone());
                }
            } else {
                seen.push(pattern);
            }
        }
        duplicates
    }
}

fn normalize(text: &str) -> String {
    text.to_uppercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn deserialize_unique_variables<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, VariableDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueVariables(PhantomData<VariableDescriptor>);

    impl<'de> Visitor<'de> for UniqueVariables {
        type Value = IndexMap<String, VariableDescriptor>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of variable names to descriptors")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut variables = IndexMap::new();
            while let Some((name, descriptor)) =
                access.next_entry::<String, VariableDescriptor>()?
            {
                if variables.contains_key(&name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate variable \"{}\"",
                        name
                    )));
                }
                variables.insert(name, descriptor);
            }
            Ok(variables)
        }
    }

    deserializer.deserialize_map(UniqueVariables(PhantomData))
}
