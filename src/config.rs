//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgforest/orgforest.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ORGFOREST_*` prefix, `__` between sections
//!    (e.g. `ORGFOREST_COLUMNS__TEAM=Squad`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{ColumnNames, ForestConfig, DEFAULT_TEAM};

/// Placeholder texts shown where data is missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
    /// Team given to positions without a team value
    pub team_default: String,
    /// Detail view text for a blank team
    pub team_missing: String,
    /// Detail view text for a position without a manager
    pub no_manager: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            team_default: DEFAULT_TEAM.into(),
            team_missing: "Não informado".into(),
            no_manager: "Sem gestor direto".into(),
        }
    }
}

/// Raw column names for intermediate parsing (None = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawColumnNames {
    pub company: Option<String>,
    pub manager: Option<String>,
    pub collaborator: Option<String>,
    pub title: Option<String>,
    pub team: Option<String>,
}

/// Raw labels for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLabels {
    pub team_default: Option<String>,
    pub team_missing: Option<String>,
    pub no_manager: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub columns: RawColumnNames,
    pub labels: RawLabels,
}

/// Unified configuration for orgforest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Sheet column names
    pub columns: ColumnNames,
    /// Placeholder texts
    pub labels: Labels,
}

/// Get the XDG config directory for orgforest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgforest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgforest.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Project settings onto what the forest builder needs.
    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            columns: self.columns.clone(),
            team_default: self.labels.team_default.clone(),
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        Self {
            columns: ColumnNames {
                company: pick(&overlay.columns.company, &self.columns.company),
                manager: pick(&overlay.columns.manager, &self.columns.manager),
                collaborator: pick(&overlay.columns.collaborator, &self.columns.collaborator),
                title: pick(&overlay.columns.title, &self.columns.title),
                team: pick(&overlay.columns.team, &self.columns.team),
            },
            labels: Labels {
                team_default: pick(&overlay.labels.team_default, &self.labels.team_default),
                team_missing: pick(&overlay.labels.team_missing, &self.labels.team_missing),
                no_manager: pick(&overlay.labels.no_manager, &self.labels.no_manager),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit file
        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current, Self::environment())
    }

    /// Load from a single file on top of defaults, ignoring global config and
    /// environment.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    fn environment() -> Environment {
        Environment::with_prefix("ORGFOREST")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply ORGFOREST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        let overrides: [(&str, &mut String); 8] = [
            ("columns.company", &mut settings.columns.company),
            ("columns.manager", &mut settings.columns.manager),
            ("columns.collaborator", &mut settings.columns.collaborator),
            ("columns.title", &mut settings.columns.title),
            ("columns.team", &mut settings.columns.team),
            ("labels.team_default", &mut settings.labels.team_default),
            ("labels.team_missing", &mut settings.labels.team_missing),
            ("labels.no_manager", &mut settings.labels.no_manager),
        ];
        for (key, slot) in overrides {
            if let Ok(val) = config.get_string(key) {
                *slot = val;
            }
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
