//! Application configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::PagepartsError;
use crate::data::{DataSource, Row, StaticDataSource};
use crate::page::Page;
use crate::render::DEFAULT_MAX_RENDER_DEPTH;
use crate::templating::Localization;

/// Locale used when a request names none.
pub const DEFAULT_LOCALE: &str = "nl";

/// Top-level application configuration.
///
/// ```yaml
/// title: Shop
/// default_locale: nl
/// localization:
///   en: { products: Products }
/// components:
///   - name: list
///     templates:
///       - { name: list, source: "<ul>{{ item | safe }}</ul>" }
///   - name: item
///     templates:
///       - { name: item, path: templates/item.html }
///     data:
///       rows: [{ title: Lamp }]
/// pages:
///   - route: /products/
///     parts:
///       - { name: list, children: [{ name: item }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_locale")]
    pub default_locale: String,

    #[serde(default = "default_max_render_depth")]
    pub max_render_depth: usize,

    /// HTML-escape row values in templates
    #[serde(default = "default_autoescape")]
    pub autoescape: bool,

    #[serde(default)]
    pub debug: bool,

    /// Inline document template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Document template file, relative to the configuration file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<PathBuf>,

    /// Locale → message key → text
    #[serde(default)]
    pub localization: BTreeMap<String, BTreeMap<String, String>>,

    #[serde(default)]
    pub components: Vec<ComponentConfig>,

    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            default_locale: default_locale(),
            max_render_depth: default_max_render_depth(),
            autoescape: default_autoescape(),
            debug: false,
            document: None,
            document_path: None,
            localization: BTreeMap::new(),
            components: Vec::new(),
            pages: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn localization(&self) -> Localization {
        Localization::new(self.default_locale.clone(), self.localization.clone())
    }

    /// The document template source, if one is configured.
    ///
    /// An inline `document` wins over `document_path`.
    pub fn load_document(&self, base_dir: &Path) -> Result<Option<String>, PagepartsError> {
        if let Some(source) = &self.document {
            return Ok(Some(source.clone()));
        }
        match &self.document_path {
            Some(path) => {
                let path = base_dir.join(path);
                std::fs::read_to_string(&path).map(Some).map_err(|e| {
                    PagepartsError::DocumentLoad {
                        reason: format!("{}: {}", path.display(), e),
                    }
                })
            }
            None => Ok(None),
        }
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_max_render_depth() -> usize {
    DEFAULT_MAX_RENDER_DEPTH
}

fn default_autoescape() -> bool {
    true
}

/// One component: its templates in declaration order and optional data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_template: Option<String>,

    #[serde(default)]
    pub templates: Vec<TemplateConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataConfig>,
}

/// A template given inline (`source`) or as a file (`path`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl TemplateConfig {
    /// Read the template source; `path` resolves against `base_dir`.
    pub fn load(&self, component: &str, base_dir: &Path) -> Result<String, PagepartsError> {
        let error = |reason: String| PagepartsError::TemplateLoad {
            component: component.to_string(),
            template: self.name.clone(),
            reason,
        };

        match (&self.source, &self.path) {
            (Some(source), None) => Ok(source.clone()),
            (None, Some(path)) => {
                let path = base_dir.join(path);
                std::fs::read_to_string(&path).map_err(|e| error(format!("{}: {}", path.display(), e)))
            }
            (Some(_), Some(_)) => Err(error("set either 'source' or 'path', not both".to_string())),
            (None, None) => Err(error("neither 'source' nor 'path' is set".to_string())),
        }
    }
}

/// Rows served to a component, optionally filtered by a key field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Field matched against the first path parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl DataConfig {
    pub fn to_source(&self) -> Arc<dyn DataSource> {
        let source = StaticDataSource::new(self.rows.clone());
        match &self.key {
            Some(key) => Arc::new(source.with_key(key.clone())),
            None => Arc::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestContext;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config: AppConfig = serde_yaml::from_str("title: Shop\n").unwrap();
        assert_eq!(config.default_locale, "nl");
        assert_eq!(config.max_render_depth, DEFAULT_MAX_RENDER_DEPTH);
        assert!(config.autoescape);
        assert!(!config.debug);
        assert!(config.components.is_empty());

        let default = AppConfig::default();
        assert_eq!(default.default_locale, config.default_locale);
        assert_eq!(default.autoescape, config.autoescape);
    }

    #[test]
    fn test_template_load_inline_and_file() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("item.html"), "<li></li>").unwrap();

        let inline = TemplateConfig {
            name: "a".into(),
            source: Some("A".into()),
            path: None,
        };
        assert_eq!(inline.load("c", temp.path()).unwrap(), "A");

        let file = TemplateConfig {
            name: "item".into(),
            source: None,
            path: Some("item.html".into()),
        };
        assert_eq!(file.load("c", temp.path()).unwrap(), "<li></li>");

        let missing = TemplateConfig {
            name: "gone".into(),
            source: None,
            path: Some("gone.html".into()),
        };
        assert!(matches!(
            missing.load("c", temp.path()),
            Err(PagepartsError::TemplateLoad { template, .. }) if template == "gone"
        ));

        let neither = TemplateConfig {
            name: "x".into(),
            source: None,
            path: None,
        };
        assert!(neither.load("c", temp.path()).is_err());
    }

    #[test]
    fn test_document_prefers_inline() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("doc.html"), "FILE").unwrap();

        let mut config = AppConfig {
            document_path: Some("doc.html".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.load_document(temp.path()).unwrap().as_deref(), Some("FILE"));

        config.document = Some("INLINE".into());
        assert_eq!(config.load_document(temp.path()).unwrap().as_deref(), Some("INLINE"));

        assert!(AppConfig::default().load_document(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_data_config_key_filters() {
        let data: DataConfig =
            serde_yaml::from_str("key: id\nrows:\n  - { id: 1, t: a }\n  - { id: 2, t: b }\n")
                .unwrap();
        let rows = data.to_source().fetch(&["2".to_string()], &RequestContext::new("/", "nl")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["t"], "b");
    }
}
