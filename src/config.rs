//! Project configuration for fastsetup.
//! Configuration is optional: when no file is present every command runs
//! with the Unity defaults.

use crate::constants::{
    CONFIG_FILES, DEFAULT_ASSETS_DIR, DEFAULT_MANIFEST_PATH, DEFAULT_SCRIPT_EXTENSION,
    DEFAULT_SCRIPT_TEMPLATES_DIR,
};
use crate::error::{Error, Result};
use crate::ioutils::read_text;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from `fastsetup.json`, `fastsetup.yml` or `fastsetup.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root folder that outlines and script paths are placed under
    pub assets_dir: String,
    /// Package manifest, relative to the project directory
    pub manifest_path: PathBuf,
    /// Where project script templates live and where `copy-templates` writes
    pub script_templates_dir: PathBuf,
    /// Editor-bundled templates, searched non-recursively after the project ones
    pub editor_templates_dir: Option<PathBuf>,
    pub script_extension: String,
    /// Extra glob patterns skipped by `copy-templates`
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            script_templates_dir: PathBuf::from(DEFAULT_SCRIPT_TEMPLATES_DIR),
            editor_templates_dir: None,
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            ignore: Vec::new(),
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        if self.assets_dir.trim().is_empty() {
            return Err(Error::ConfigError("assets_dir must not be empty".into()));
        }
        if !self.script_extension.starts_with('.') || self.script_extension.len() < 2 {
            return Err(Error::ConfigError(
                "script_extension must start with '.' and have at least 1 character after it"
                    .into(),
            ));
        }
        Ok(self)
    }
}

/// Loads the configuration from the project directory.
///
/// Files are tried in the order of [`CONFIG_FILES`]; the first one found wins.
///
/// # Errors
/// * `Error::ConfigError` if the file cannot be parsed or fails validation
pub fn load_config<P: AsRef<Path>>(project_dir: P) -> Result<Config> {
    let project_dir = project_dir.as_ref();
    for file in CONFIG_FILES {
        let config_path = project_dir.join(file);
        if !config_path.is_file() {
            continue;
        }
        debug!("Loading configuration from {}", config_path.display());
        let content = read_text(&config_path)?;
        let config: Config = if file.ends_with(".json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::ConfigError(format!("{}: {}", file, e)))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::ConfigError(format!("{}: {}", file, e)))?
        };
        return config.validate();
    }

    debug!("No configuration file found (tried: {}), using defaults", CONFIG_FILES.join(", "));
    Ok(Config::default())
}
