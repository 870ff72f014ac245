//! Template lookup and rendering for components.
//!
//! The part renderer never talks to Tera directly. It goes through the
//! [`TemplateProvider`] trait, so tests and embedders can swap in their own
//! engine. [`TeraTemplateProvider`] is the implementation used by the app.
//!
//! # Template Context
//!
//! Each render receives:
//! - every field of the row being rendered (data source fields merged with
//!   child part output)
//! - `locale`: the request locale
//! - `i18n`: the message table for that locale (see [`Localization`])
//!
//! ```rust
//! use pageparts::templating::{Localization, TemplateProvider, TeraTemplateProvider};
//! use pageparts::data::Row;
//!
//! let mut provider = TeraTemplateProvider::new(Localization::default(), true);
//! provider.add_template("greeting", "greeting", "Hello {{ name }}").unwrap();
//!
//! let template = provider.resolve("greeting", "greeting").unwrap();
//! let mut row = Row::new();
//! row.insert("name".into(), "world".into());
//! assert_eq!(provider.render(&template, &row, "en").unwrap(), "Hello world");
//! ```

mod error;
mod localization;
mod renderer;

pub use error::{ErrorLocation, TemplateError};
pub use localization::Localization;
pub use renderer::{TeraTemplateProvider, format_tera_error};

use crate::data::Row;

/// A resolved template: the owning component and the template name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    component: String,
    name: String,
}

impl TemplateRef {
    pub fn new(component: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            name: name.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Stores component templates and renders them for one row of data.
pub trait TemplateProvider: Send + Sync {
    /// Template names of `component`, in declaration order.
    fn templates(&self, component: &str) -> Vec<String>;

    /// Look up a template; `None` if the component has no template by that name.
    fn resolve(&self, component: &str, template: &str) -> Option<TemplateRef>;

    /// Render `template` with `row` as its data context.
    fn render(&self, template: &TemplateRef, row: &Row, locale: &str)
    -> Result<String, TemplateError>;

    /// Raw template source, for client-side `<template>` tags.
    fn source(&self, _template: &TemplateRef) -> Option<&str> {
        None
    }
}
