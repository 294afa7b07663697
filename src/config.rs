//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/catree/catree.toml`
//! 3. Local config: `<working dir>/.catree.toml`
//! 4. Environment variables: `CATREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::LayoutOptions;

/// Node geometry and spacing used by the layout command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    /// Rendered node width
    pub node_width: f64,
    /// Rendered node height
    pub node_height: f64,
    /// Horizontal gap between leaf slots
    pub h_spacing: f64,
    /// Vertical gap between depth levels
    pub v_spacing: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let defaults = LayoutOptions::default();
        Self {
            node_width: defaults.node_width,
            node_height: defaults.node_height,
            h_spacing: defaults.h_spacing,
            v_spacing: defaults.v_spacing,
        }
    }
}

impl From<&LayoutSettings> for LayoutOptions {
    fn from(settings: &LayoutSettings) -> Self {
        Self {
            node_width: settings.node_width,
            node_height: settings.node_height,
            h_spacing: settings.h_spacing,
            v_spacing: settings.v_spacing,
        }
    }
}

/// Raw layout settings for intermediate parsing (fields are Option to detect
/// "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutSettings {
    pub node_width: Option<f64>,
    pub node_height: Option<f64>,
    pub h_spacing: Option<f64>,
    pub v_spacing: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub layout: RawLayoutSettings,
}

/// Unified configuration for catree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding the flat category list (default: categories.json)
    pub data_file: PathBuf,
    /// Layout geometry
    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("categories.json"),
            layout: LayoutSettings::default(),
        }
    }
}

/// Get the XDG config directory for catree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "catree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("catree.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".catree.toml")
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

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some,
    /// otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            layout: LayoutSettings {
                node_width: overlay.layout.node_width.unwrap_or(self.layout.node_width),
                node_height: overlay
                    .layout
                    .node_height
                    .unwrap_or(self.layout.node_height),
                h_spacing: overlay.layout.h_spacing.unwrap_or(self.layout.h_spacing),
                v_spacing: overlay.layout.v_spacing.unwrap_or(self.layout.v_spacing),
            },
        }
    }

    /// Apply `CATREE_*` environment variables onto the current settings.
    ///
    /// Nested keys use `__`, e.g. `CATREE_LAYOUT__NODE_WIDTH=160`.
    fn apply_env_overrides(current: Self) -> Result<Self, ApplicationError> {
        let serialized =
            toml::to_string(&current).map_err(|e| ApplicationError::Config {
                message: format!("serialize settings: {}", e),
            })?;
        let cfg = Config::builder()
            .add_source(File::from_str(&serialized, FileFormat::Toml))
            .add_source(
                Environment::with_prefix("CATREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ApplicationError::Config {
                message: format!("apply env overrides: {}", e),
            })?;
        cfg.try_deserialize()
            .map_err(|e| ApplicationError::Config {
                message: format!("deserialize settings: {}", e),
            })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `working_dir` - Optional directory for the local config file
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/catree/catree.toml`
    /// 3. Local config: `<working_dir>/.catree.toml`
    /// 4. Environment variables: `CATREE_*` prefix
    pub fn load(working_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = working_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        (&self.layout).into()
    }
}
