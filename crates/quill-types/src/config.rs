//! Plugin descriptor configuration.
//!
//! Every plugin that registers commands describes itself with a
//! `plugin.toml` file. The `[commands]` table tunes how the command
//! builder compiles nodes for that plugin.

use serde::Deserialize;

use crate::error::{QuillError, Result};

/// Message sent to a caller when a command was compiled without any executor.
pub const DEFAULT_NO_EXECUTOR_MESSAGE: &str = "Error: No executor found!";

/// Identity and settings of a plugin that owns commands.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginDescriptor {
    /// Plugin name, also used as the command namespace.
    pub name: String,
    /// Plugin version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// Optional one-line description.
    #[serde(default)]
    pub description: Option<String>,
    /// Command compilation settings.
    #[serde(default)]
    pub commands: CommandSettings,
}

/// Settings applied when compiling this plugin's commands.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandSettings {
    /// Text sent by the fallback handler of a node with no executors.
    #[serde(default = "default_no_executor_message")]
    pub no_executor_message: String,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            no_executor_message: default_no_executor_message(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_no_executor_message() -> String {
    DEFAULT_NO_EXECUTOR_MESSAGE.to_string()
}

impl PluginDescriptor {
    /// Descriptor with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            description: None,
            commands: CommandSettings::default(),
        }
    }

    /// Parse and validate a `plugin.toml` document.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let descriptor: Self = toml::from_str(toml_str)?;
        descriptor.validate()?;
        log::debug!(
            "Loaded plugin descriptor: {} v{}",
            descriptor.name,
            descriptor.version
        );
        Ok(descriptor)
    }

    /// Check the fields that cannot be expressed in the TOML schema.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(QuillError::Config(
                "plugin name must not be empty".to_string(),
            ));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(QuillError::Config(format!(
                "plugin name must not contain whitespace: {:?}",
                self.name
            )));
        }
        // ':' separates the namespace from the command name in labels.
        if self.name.contains(':') {
            return Err(QuillError::Config(format!(
                "plugin name must not contain ':': {:?}",
                self.name
            )));
        }
        Ok(())
    }
}
