//! Configuration file parsing.
//!
//! The format follows the file extension: `.yml`/`.yaml` (YAML), `.toml`, or
//! `.json`. Errors carry the file path so the CLI can point at the file.
//!
//! ```rust,no_run
//! use pageparts::config::{AppConfig, parse_config};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config: AppConfig = parse_config(Path::new("app.yml"))?;
//! println!("{} components", config.components.len());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::core::PagepartsError;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "app.yml";

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "PAGEPARTS_CONFIG";

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, PagepartsError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yml" | "yaml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(PagepartsError::UnsupportedConfigFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Deserialize `content` in this format.
    pub fn parse<T>(self, content: &str) -> Result<T, String>
    where
        T: serde::de::DeserializeOwned,
    {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Parse a configuration file into `T`.
///
/// # Errors
///
/// - [`PagepartsError::ConfigNotFound`] if `path` does not exist
/// - [`PagepartsError::UnsupportedConfigFormat`] for unknown extensions
/// - [`PagepartsError::Io`] if the file cannot be read
/// - [`PagepartsError::ConfigParse`] if the content does not match `T`
pub fn parse_config<T>(path: &Path) -> Result<T, PagepartsError>
where
    T: serde::de::DeserializeOwned,
{
    if !path.exists() {
        return Err(PagepartsError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }
    let format = ConfigFormat::from_path(path)?;

    tracing::debug!("Reading {:?} configuration from {}", format, path.display());
    let content = std::fs::read_to_string(path)?;

    format.parse(&content).map_err(|reason| PagepartsError::ConfigParse {
        path: path.display().to_string(),
        reason,
    })
}
