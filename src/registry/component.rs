//! Component descriptors.

use std::fmt;
use std::sync::Arc;

use crate::core::PagepartsError;
use crate::data::DataSource;

/// A named, reusable rendering unit.
///
/// Templates live in the [`TemplateProvider`](crate::templating::TemplateProvider);
/// the component carries its identity, its optional data source and the
/// template to use when a part does not name one.
#[derive(Clone)]
pub struct Component {
    name: String,
    default_template: Option<String>,
    data_source: Option<Arc<dyn DataSource>>,
}

impl Component {
    /// Create a component without data source or default template.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_template: None,
            data_source: None,
        }
    }

    #[must_use]
    pub fn with_default_template(mut self, template: impl Into<String>) -> Self {
        self.default_template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_data_source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.data_source = Some(source);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its last segment; empty for top-level components.
    pub fn namespace(&self) -> &str {
        self.name.rsplit_once('.').map(|(ns, _)| ns).unwrap_or_default()
    }

    pub fn default_template(&self) -> Option<&str> {
        self.default_template.as_deref()
    }

    pub fn data_source(&self) -> Option<&dyn DataSource> {
        self.data_source.as_deref()
    }

    pub(crate) fn set_data_source(&mut self, source: Arc<dyn DataSource>) {
        self.data_source = Some(source);
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("default_template", &self.default_template)
            .field("data_source", &self.data_source.as_ref().map(|s| s.describe()))
            .finish()
    }
}

/// Check that `name` is a dot-separated list of identifier segments.
pub fn validate_component_name(name: &str) -> Result<(), PagepartsError> {
    let invalid = |reason: &str| PagepartsError::InvalidComponentName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }

    for segment in name.split('.') {
        if segment.is_empty() {
            return Err(invalid("empty segment between dots"));
        }
        if let Some(c) =
            segment.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!("unexpected character '{}'", c)));
        }
    }

    Ok(())
}
