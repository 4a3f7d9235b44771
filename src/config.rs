use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::templates::{TemplateConfig, TemplateRegistry};

pub const CONFIG_FILE_NAME: &str = ".docvarsrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    /// Replaces the built-in template table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<TemplateConfig>>,
    #[serde(default = "default_narrative_timeout_secs")]
    pub narrative_timeout_secs: u64,
}

fn default_ignores() -> Vec<String> {
    ["**/~$*", "**/.git/**"].map(String::from).to_vec()
}

fn default_narrative_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            templates: None,
            narrative_timeout_secs: default_narrative_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid ignore globs, template patterns declared
    /// twice, or a zero narrative timeout.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if let Some(templates) = &self.templates {
            for template in templates {
                if template.template_pattern.trim().is_empty() {
                    bail!("Empty 'templatePattern' in 'templates'");
                }
            }
            let duplicates = TemplateRegistry::new(templates.clone()).duplicate_patterns();
            if !duplicates.is_empty() {
                bail!(
                    "Duplicate 'templatePattern' in 'templates': {}",
                    duplicates
                        .iter()
                        .map(|p| format!("\"{}\"", p))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }

        if self.narrative_timeout_secs == 0 {
            bail!("'narrativeTimeoutSecs' must be greater than 0");
        }

        Ok(())
    }

    /// The template table in effect: the configured one, or the built-in.
    pub fn template_registry(&self) -> TemplateRegistry {
        match &self.templates {
            Some(templates) => TemplateRegistry::new(templates.clone()),
            None => TemplateRegistry::builtin(),
        }
    }

    pub fn narrative_timeout(&self) -> Duration {
        Duration::from_secs(self.narrative_timeout_secs)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config {
        templates: Some(TemplateRegistry::builtin().templates().to_vec()),
        ..Config::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
