use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rule_view::{EditorLinkResolver, NoEditorLinks, TransformEditorLinks};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "rule_viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub editor_base_url: Option<String>,
    pub project: Option<String>,
    pub transform_task: Option<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor_base_url: None,
            project: None,
            transform_task: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// Editor links need all three of base url, project and task; anything
    /// less disables them.
    pub fn editor_links(&self) -> Result<Box<dyn EditorLinkResolver>> {
        let (Some(base_url), Some(project), Some(task)) = (
            self.editor_base_url.as_deref(),
            self.project.as_deref(),
            self.transform_task.as_deref(),
        ) else {
            return Ok(Box::new(NoEditorLinks));
        };

        let links = TransformEditorLinks::new(base_url, project, task)
            .with_context(|| format!("invalid editor link settings for '{base_url}'"))?;
        Ok(Box::new(links))
    }
}

/// Defaults, then the config file, then environment variables.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings> {
    let mut settings = match explicit_path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_settings_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    parse_settings(&raw).with_context(|| format!("failed to parse config file '{}'", path.display()))
}

fn parse_settings(raw: &str) -> Result<Settings> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("RULE_VIEWER_BASE_URL") {
        settings.editor_base_url = Some(v);
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        settings.editor_base_url = Some(v);
    }

    if let Some(v) = lookup("APP__PROJECT") {
        settings.project = Some(v);
    }

    if let Some(v) = lookup("APP__TRANSFORM_TASK") {
        settings.transform_task = Some(v);
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
