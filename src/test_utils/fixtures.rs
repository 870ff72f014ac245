//! Registry and configuration fixtures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::data::{DataSource, Row};
use crate::registry::{Component, ComponentRegistry};
use crate::templating::{Localization, TeraTemplateProvider};

/// Convert a JSON object literal into a [`Row`].
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("row fixture must be a JSON object, got {other}"),
    }
}

/// Convert a JSON array of objects into rows.
pub fn rows(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items.into_iter().map(row).collect(),
        other => panic!("rows fixture must be a JSON array, got {other}"),
    }
}

/// Builder for a [`ComponentRegistry`] in tests.
///
/// ```rust,no_run
/// use pageparts::registry::Component;
/// use pageparts::test_utils::FixtureRegistry;
///
/// let registry = FixtureRegistry::new()
///     .template("list", "list", "<ul>{{ item | safe }}</ul>")
///     .template("item", "item", "<li>{{ title }}</li>")
///     .component(Component::new("list"))
///     .component(Component::new("item"))
///     .build();
/// ```
#[derive(Default)]
pub struct FixtureRegistry {
    localization: Localization,
    autoescape: bool,
    templates: Vec<(String, String, String)>,
    components: Vec<Component>,
    bindings: Vec<(String, Arc<dyn DataSource>)>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self {
            autoescape: true,
            ..Self::default()
        }
    }

    pub fn localization(mut self, localization: Localization) -> Self {
        self.localization = localization;
        self
    }

    pub fn autoescape(mut self, enabled: bool) -> Self {
        self.autoescape = enabled;
        self
    }

    pub fn template(mut self, component: &str, name: &str, source: &str) -> Self {
        self.templates.push((component.to_string(), name.to_string(), source.to_string()));
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn bind(mut self, name: &str, source: Arc<dyn DataSource>) -> Self {
        self.bindings.push((name.to_string(), source));
        self
    }

    /// Build the registry.
    ///
    /// # Panics
    ///
    /// Panics on template syntax errors and invalid or duplicate components.
    pub fn build(self) -> ComponentRegistry {
        let mut provider = TeraTemplateProvider::new(self.localization, self.autoescape);
        for (component, name, source) in &self.templates {
            if let Err(e) = provider.add_template(component, name, source) {
                panic!("fixture template {component}/{name} failed to parse: {e}");
            }
        }

        let mut builder = ComponentRegistry::builder(Arc::new(provider));
        for component in self.components {
            let name = component.name().to_string();
            if let Err(e) = builder.register(component) {
                panic!("fixture component {name} rejected: {e}");
            }
        }
        for (name, source) in self.bindings {
            builder.bind_data(name, source);
        }
        builder.build()
    }

    pub fn build_shared(self) -> Arc<ComponentRegistry> {
        Arc::new(self.build())
    }
}

/// A sample shop application written to disk as configuration files.
///
/// Lays out `app.yml` (or another file name) plus one template file under
/// `templates/` so that relative template paths get exercised.
#[derive(Debug, Clone)]
pub struct ConfigFixture {
    files: BTreeMap<String, String>,
    config_name: String,
}

impl ConfigFixture {
    /// The shop application in YAML.
    pub fn shop() -> Self {
        let mut files = BTreeMap::new();
        files.insert("app.yml".to_string(), SHOP_YAML.to_string());
        files.insert("templates/item.html".to_string(), ITEM_TEMPLATE.to_string());
        Self {
            files,
            config_name: "app.yml".to_string(),
        }
    }

    /// The same application in TOML.
    pub fn shop_toml() -> Self {
        let mut files = BTreeMap::new();
        files.insert("app.toml".to_string(), SHOP_TOML.to_string());
        files.insert("templates/item.html".to_string(), ITEM_TEMPLATE.to_string());
        Self {
            files,
            config_name: "app.toml".to_string(),
        }
    }

    /// Replace or add a file.
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.insert(relative.to_string(), content.to_string());
        self
    }

    /// Replace the configuration file's content.
    pub fn with_config(self, content: &str) -> Self {
        let name = self.config_name.clone();
        self.with_file(&name, content)
    }

    /// Write every file below `dir` and return the configuration file path.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        for (relative, content) in &self.files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
        }
        Ok(dir.join(&self.config_name))
    }
}

const ITEM_TEMPLATE: &str = "<li>{{ title }}</li>";

const SHOP_YAML: &str = r#"title: Shop
default_locale: nl
localization:
  nl:
    products: Producten
    login: Inloggen
  en:
    products: Products
    login: Log in
components:
  - name: list
    templates:
      - name: list
        source: "<h1>{{ i18n.products }}</h1><ul>{{ item | safe }}</ul>"
      - name: compact
        source: "{{ item | safe }}"
  - name: item
    templates:
      - name: item
        path: templates/item.html
    data:
      rows:
        - { id: 1, title: Lamp }
        - { id: 2, title: Chair }
  - name: product
    templates:
      - name: detail
        source: "<p>{{ title }}</p>"
    data:
      key: id
      rows:
        - { id: 1, title: Lamp }
        - { id: 2, title: Chair }
  - name: login
    templates:
      - name: form
        source: "<form action=\"{{ uri }}\">{{ i18n.login }}{% if error %}<em>{{ error }}</em>{% endif %}</form>"
  - name: account
    templates:
      - name: account
        source: "<p>{{ name }}</p>"
    data:
      rows:
        - { name: Alice }
pages:
  - route: /products/
    parts:
      - name: list
        children:
          - name: item
  - route: /product/
    parts:
      - name: product
  - route: /account/
    auth: true
    parts:
      - name: account
"#;

const SHOP_TOML: &str = r#"title = "Shop"
default_locale = "nl"

[localization.nl]
products = "Producten"

[localization.en]
products = "Products"

[[components]]
name = "list"
[[components.templates]]
name = "list"
source = "<h1>{{ i18n.products }}</h1><ul>{{ item | safe }}</ul>"

[[components]]
name = "item"
[[components.templates]]
name = "item"
path = "templates/item.html"
[components.data]
rows = [{ id = 1, title = "Lamp" }, { id = 2, title = "Chair" }]

[[pages]]
route = "/products/"
[[pages.parts]]
name = "list"
[[pages.parts.children]]
name = "item"
"#;
