//! pageparts - server-side page composition
//!
//! Pages are forests of [`render::Part`]s. Each part names a registered
//! component; its children render first and their HTML becomes data for the
//! part, the component's data source supplies rows, and one of its templates
//! renders once per row. Every part's output is wrapped exactly once in an
//! element naming it:
//!
//! ```text
//! <list data-component="list">
//!   …list template for row 1, with {item: "<item data-component=\"item\">…</item>"}…
//!   …list template for row 2…
//! </list>
//! ```
//!
//! # Modules
//!
//! - [`render`] - the recursive part renderer and its error type
//! - [`registry`] - component descriptors and the read-only registry
//! - [`templating`] - the Tera-backed template provider and localization
//! - [`data`] - data source and escaper seams
//! - [`request`] - per-request context and path parameters
//! - [`page`] - pages, route table, auth and the document shell
//! - [`app`] - configuration turned into a request handler
//! - [`config`] - YAML/TOML/JSON application configuration
//! - [`cli`] - the `pageparts` command line
//! - [`core`] - setup errors and user-facing error formatting
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pageparts::data::StaticDataSource;
//! use pageparts::registry::{Component, ComponentRegistry};
//! use pageparts::render::{Part, PartRenderer};
//! use pageparts::request::RequestContext;
//! use pageparts::templating::{Localization, TeraTemplateProvider};
//!
//! let mut templates = TeraTemplateProvider::new(Localization::default(), true);
//! templates.add_template("list", "list", "<ul>{{ item | safe }}</ul>").unwrap();
//! templates.add_template("item", "item", "<li>{{ title }}</li>").unwrap();
//!
//! let rows = vec![serde_json::json!({"title": "Lamp"}).as_object().unwrap().clone()];
//! let mut builder = ComponentRegistry::builder(Arc::new(templates));
//! builder.register(Component::new("list")).unwrap();
//! builder
//!     .register(Component::new("item").with_data_source(Arc::new(StaticDataSource::new(rows))))
//!     .unwrap();
//! let registry = builder.build();
//!
//! let part = Part::new("list").with_child(Part::new("item"));
//! let html = PartRenderer::new(&registry).render(&part, &RequestContext::new("/", "en")).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<list data-component="list"><ul><item data-component="item"><li>Lamp</li></item></ul></list>"#
//! );
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod page;
pub mod registry;
pub mod render;
pub mod request;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
