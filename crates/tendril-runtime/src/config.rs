//! Runtime configuration.
//!
//! ```toml
//! default_library = "core"
//!
//! [[plugin]]
//! name = "geometry"
//! path = "target/debug/libgeometry.so"
//! ```

use crate::plugin_loader::PluginError;
use crate::runtime::CORE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// A shared object to load as a library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Registered name; also selects the `tendril_{name}_library` symbol.
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Library used when none is named on the command line.
    pub default_library: String,
    #[serde(rename = "plugin")]
    pub plugins: Vec<PluginConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_library: CORE.to_string(),
            plugins: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_toml("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.default_library, "core");
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_plugins() {
        let config = RuntimeConfig::from_toml(
            r#"
default_library = "math"

[[plugin]]
name = "geometry"
path = "lib/libgeometry.so"

[[plugin]]
name = "text"
path = "lib/libtext.so"
"#,
        )
        .unwrap();
        assert_eq!(config.default_library, "math");
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[0].name, "geometry");
        assert_eq!(config.plugins[1].path, PathBuf::from("lib/libtext.so"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RuntimeConfig::from_toml("default_library = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
