//! Configuration
//!
//! Defaults for every dialog opened by a [`crate::ModalOpener`]. Per-call
//! [`crate::OpenOptions`] override them field by field. The file is JSON;
//! `generate_schema` prints its JSON Schema.

use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::form::{PartialFormValues, DEFAULT_EMAIL_PATTERN, DEFAULT_EXPERIENCE_OPTIONS};
use crate::modal::DEFAULT_MAX_WIDTH;

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub modal: ModalConfig,
}

/// Defaults for the application form dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ModalConfig {
    /// Dialog heading
    pub title: String,

    /// Text under the heading
    pub description: String,

    /// Regular expression an email address must match
    pub email_pattern: String,

    /// Allowed experience brackets, in display order
    pub experience_options: Vec<String>,

    /// Widest the dialog may be, in columns
    pub max_width: u16,

    /// Values the form starts with
    pub initial_values: PartialFormValues,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            title: "Application form".to_string(),
            description: "Tell us a little about yourself. We will get back to you by email."
                .to_string(),
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
            experience_options: DEFAULT_EXPERIENCE_OPTIONS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            max_width: DEFAULT_MAX_WIDTH,
            initial_values: PartialFormValues::default(),
        }
    }
}

impl Config {
    /// Load a config file; missing keys take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&contents).map_err(|e| {
            io::Error::other(format!(
                "Failed to parse config {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Load `path` if it exists, otherwise the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)
    }

    /// `<config dir>/form-modal/config.json`
    #[cfg(feature = "runtime")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("form-modal").join("config.json"))
    }

    /// Without the runtime feature there is no platform config dir
    #[cfg(not(feature = "runtime"))]
    pub fn default_path() -> Option<PathBuf> {
        None
    }
}
