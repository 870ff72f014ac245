//! Component registry.
//!
//! The registry maps component names to [`Component`] descriptors and owns the
//! [`TemplateProvider`] that holds their templates. It is assembled once with a
//! [`RegistryBuilder`] and never changes afterwards; renders share it through an
//! `Arc` and only read from it.
//!
//! ```rust
//! use std::sync::Arc;
//! use pageparts::registry::{Component, ComponentRegistry};
//! use pageparts::templating::{Localization, TeraTemplateProvider};
//!
//! let mut templates = TeraTemplateProvider::new(Localization::default(), true);
//! templates.add_template("list", "list", "<ul></ul>").unwrap();
//!
//! let mut builder = ComponentRegistry::builder(Arc::new(templates));
//! builder.register(Component::new("list")).unwrap();
//! let registry = builder.build();
//!
//! assert!(registry.lookup("list").is_some());
//! assert_eq!(registry.templates("list").unwrap(), vec!["list"]);
//! ```

mod component;

pub use component::{Component, validate_component_name};

use std::collections::HashMap;
use std::sync::Arc;
use strsim::levenshtein;

use crate::core::PagepartsError;
use crate::data::DataSource;
use crate::render::RenderError;
use crate::templating::TemplateProvider;

/// Read-only name → component mapping.
pub struct ComponentRegistry {
    components: HashMap<String, Component>,
    templates: Arc<dyn TemplateProvider>,
}

impl ComponentRegistry {
    pub fn builder(templates: Arc<dyn TemplateProvider>) -> RegistryBuilder {
        RegistryBuilder {
            components: HashMap::new(),
            bindings: Vec::new(),
            templates,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Like [`lookup`](Self::lookup), but reports a missing component as
    /// [`RenderError::ComponentNotFound`] with close names as suggestions.
    pub fn require(&self, name: &str) -> Result<&Component, RenderError> {
        self.lookup(name).ok_or_else(|| RenderError::ComponentNotFound {
            name: name.to_string(),
            chain: Vec::new(),
            suggestions: self.suggest(name),
        })
    }

    /// Template names of a component, in declaration order.
    pub fn templates(&self, name: &str) -> Result<Vec<String>, RenderError> {
        let component = self.require(name)?;
        Ok(self.templates.templates(component.name()))
    }

    pub fn template_provider(&self) -> &dyn TemplateProvider {
        self.templates.as_ref()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered components, sorted by name.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.names().into_iter().filter_map(move |name| self.components.get(name))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Up to three registered names within half the length of `name` in edit distance.
    pub fn suggest(&self, name: &str) -> Vec<String> {
        let threshold = (name.len() / 2).max(1);
        let mut scored: Vec<(usize, &str)> = self
            .components
            .keys()
            .map(|candidate| (levenshtein(name, candidate), candidate.as_str()))
            .filter(|(distance, _)| *distance <= threshold)
            .collect();
        scored.sort();
        scored.into_iter().take(3).map(|(_, candidate)| candidate.to_string()).collect()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry").field("components", &self.names()).finish()
    }
}

/// Collects components and data bindings, then freezes them into a
/// [`ComponentRegistry`].
pub struct RegistryBuilder {
    components: HashMap<String, Component>,
    bindings: Vec<(String, Arc<dyn DataSource>)>,
    templates: Arc<dyn TemplateProvider>,
}

impl RegistryBuilder {
    /// Add a component. Names must be valid and unique.
    pub fn register(&mut self, component: Component) -> Result<&mut Self, PagepartsError> {
        validate_component_name(component.name())?;
        if self.components.contains_key(component.name()) {
            return Err(PagepartsError::DuplicateComponent {
                name: component.name().to_string(),
            });
        }
        tracing::debug!("Registering component {}", component.name());
        self.components.insert(component.name().to_string(), component);
        Ok(self)
    }

    /// Bind a data source to a component by name, replacing any configured one.
    ///
    /// Bindings are applied at [`build`](Self::build); binding a name that is
    /// never registered is logged and ignored.
    pub fn bind_data(&mut self, name: impl Into<String>, source: Arc<dyn DataSource>) -> &mut Self {
        self.bindings.push((name.into(), source));
        self
    }

    pub fn build(mut self) -> ComponentRegistry {
        for (name, source) in self.bindings.drain(..) {
            match self.components.get_mut(&name) {
                Some(component) => component.set_data_source(source),
                None => tracing::warn!("Data binding for unknown component '{}' ignored", name),
            }
        }

        tracing::debug!("Component registry built with {} components", self.components.len());
        ComponentRegistry {
            components: self.components,
            templates: self.templates,
        }
    }
}
