//! Render failures.

use thiserror::Error;

use crate::data::DataSourceError;
use crate::templating::TemplateError;

/// Errors that abort a render.
///
/// Every variant unwinds the whole part tree; no partial HTML is returned.
/// Recoverable data source failures never surface here, they are absorbed by
/// the renderer (see [`FetchOutcome`](super::FetchOutcome)).
#[derive(Error, Debug)]
pub enum RenderError {
    /// A part references a component that is not registered
    #[error("Component not found for part: {name}")]
    ComponentNotFound {
        name: String,
        /// Names of the ancestor parts, root first
        chain: Vec<String>,
        /// Registered names close to `name`
        suggestions: Vec<String>,
    },

    /// The requested (or default) template does not exist on the component
    #[error("Template '{template}' not found on component '{component}'")]
    TemplateNotFound { component: String, template: String },

    /// The component has no templates at all
    #[error("Component '{component}' has no templates")]
    NoTemplates { component: String },

    /// The template engine failed
    #[error("Failed to render component '{component}': {source}")]
    Template {
        component: String,
        #[source]
        source: TemplateError,
    },

    /// The data source reported a non-recoverable failure
    #[error("Data source of component '{component}' failed: {source}")]
    DataSource {
        component: String,
        #[source]
        source: DataSourceError,
    },

    /// The part tree is deeper than the configured limit
    #[error("Part tree exceeds the maximum render depth of {limit} at part '{part}'")]
    DepthExceeded {
        part: String,
        limit: usize,
        /// Names of the ancestor parts, root first
        chain: Vec<String>,
    },
}

impl RenderError {
    /// The ancestor chain for errors that carry one.
    pub fn chain(&self) -> &[String] {
        match self {
            RenderError::ComponentNotFound {
                chain,
                ..
            }
            | RenderError::DepthExceeded {
                chain,
                ..
            } => chain,
            _ => &[],
        }
    }
}
