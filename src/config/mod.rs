//! Application configuration.
//!
//! An application is described by one file (`app.yml` by default): the
//! document shell, localization tables, components with their templates and
//! static data, and the pages that compose them. See [`AppConfig`] for the
//! layout and [`parse_config`] for format selection.

mod app;
mod parser;

pub use app::{AppConfig, ComponentConfig, DEFAULT_LOCALE, DataConfig, TemplateConfig};
pub use parser::{CONFIG_ENV_VAR, ConfigFormat, DEFAULT_CONFIG_FILE, parse_config};

use std::path::{Path, PathBuf};

/// Load an [`AppConfig`] and return it with the directory relative paths
/// resolve against.
pub fn load_app_config(path: &Path) -> Result<(AppConfig, PathBuf), crate::core::PagepartsError> {
    let config = parse_config(path)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((config, base_dir))
}
