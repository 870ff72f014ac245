//! Recursive part renderer.

use serde_json::Value;

use super::envelope::wrap;
use super::error::RenderError;
use super::outcome::{FetchOutcome, Recovery};
use super::part::Part;
use crate::data::{Escaper, Row, SqlEscaper};
use crate::registry::{Component, ComponentRegistry};
use crate::request::RequestContext;
use crate::templating::TemplateRef;

/// Default limit on part tree depth.
pub const DEFAULT_MAX_RENDER_DEPTH: usize = 32;

/// Renders part trees against a component registry.
///
/// A renderer is cheap to create and holds only borrows, so one can be built
/// per request. Rendering is synchronous and sequential: children render in
/// declared order before their parent, and the first unrecoverable error
/// aborts the whole tree.
///
/// ```rust
/// use std::sync::Arc;
/// use pageparts::registry::{Component, ComponentRegistry};
/// use pageparts::render::{Part, PartRenderer};
/// use pageparts::request::RequestContext;
/// use pageparts::templating::{Localization, TeraTemplateProvider};
///
/// let mut templates = TeraTemplateProvider::new(Localization::default(), true);
/// templates.add_template("hello", "hello", "Hi").unwrap();
/// let mut builder = ComponentRegistry::builder(Arc::new(templates));
/// builder.register(Component::new("hello")).unwrap();
/// let registry = builder.build();
///
/// let html = PartRenderer::new(&registry)
///     .render(&Part::new("hello"), &RequestContext::new("/", "en"))
///     .unwrap();
/// assert_eq!(html, r#"<hello data-component="hello">Hi</hello>"#);
/// ```
pub struct PartRenderer<'a> {
    registry: &'a ComponentRegistry,
    escaper: &'a dyn Escaper,
    max_depth: usize,
}

/// State of one render pass.
struct RenderPass<'r> {
    ctx: &'r RequestContext,
    /// Escaped once per pass; the request does not change during a render
    params: Vec<String>,
    /// Names from the root down to the part being rendered
    chain: Vec<String>,
}

impl<'a> PartRenderer<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry,
            escaper: &SqlEscaper,
            max_depth: DEFAULT_MAX_RENDER_DEPTH,
        }
    }

    #[must_use]
    pub fn with_escaper(mut self, escaper: &'a dyn Escaper) -> Self {
        self.escaper = escaper;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render `part` and its subtree into one wrapped HTML string.
    pub fn render(&self, part: &Part, ctx: &RequestContext) -> Result<String, RenderError> {
        let mut pass = RenderPass {
            ctx,
            params: ctx.path_params().iter().map(|p| self.escaper.escape(p)).collect(),
            chain: Vec::new(),
        };
        self.render_part(part, &mut pass)
    }

    /// Render a single component with caller-supplied data only.
    ///
    /// The component's data source is not consulted. Used for fallbacks such as a
    /// login form, where the data comes from the request rather than a query.
    pub fn render_component(
        &self,
        name: &str,
        template: Option<&str>,
        data: &Row,
        ctx: &RequestContext,
    ) -> Result<String, RenderError> {
        let component = self.registry.require(name)?;
        let template = self.resolve_template(component, template)?;
        let html = self.render_rows(&template, std::slice::from_ref(data), ctx.locale())?;
        Ok(wrap(component.name(), &html))
    }

    fn render_part(&self, part: &Part, pass: &mut RenderPass<'_>) -> Result<String, RenderError> {
        if pass.chain.len() >= self.max_depth {
            return Err(RenderError::DepthExceeded {
                part: part.name.clone(),
                limit: self.max_depth,
                chain: pass.chain.clone(),
            });
        }

        let component = self.registry.require(&part.name).map_err(|err| match err {
            RenderError::ComponentNotFound {
                name,
                suggestions,
                ..
            } => RenderError::ComponentNotFound {
                name,
                chain: pass.chain.clone(),
                suggestions,
            },
            other => other,
        })?;

        tracing::debug!("Rendering part {} (depth {})", part.name, pass.chain.len() + 1);

        pass.chain.push(part.name.clone());
        let mut child_outputs = Row::new();
        for child in &part.children {
            let html = self.render_part(child, pass)?;
            child_outputs.insert(child.name.clone(), Value::String(html));
        }
        pass.chain.pop();

        let template = self.resolve_template(component, part.template())?;

        let outcome = FetchOutcome::fetch(component, &pass.params, pass.ctx);
        match &outcome {
            FetchOutcome::Recovered(Recovery::EmptyResult) => {
                tracing::warn!(
                    "No data for component {} (params {:?}), rendering child data only",
                    component.name(),
                    pass.params
                );
            }
            FetchOutcome::Recovered(Recovery::Failed(err)) => {
                tracing::warn!(
                    "Data source of component {} failed: {}; rendering child data only",
                    component.name(),
                    err
                );
            }
            _ => {}
        }

        let rows = outcome.into_render_rows(child_outputs).map_err(|source| {
            RenderError::DataSource {
                component: component.name().to_string(),
                source,
            }
        })?;

        let html = self.render_rows(&template, &rows, pass.ctx.locale())?;
        Ok(wrap(&part.name, &html))
    }

    /// Explicit template, then the component default, then the first declared.
    fn resolve_template(
        &self,
        component: &Component,
        requested: Option<&str>,
    ) -> Result<TemplateRef, RenderError> {
        let provider = self.registry.template_provider();

        let name = match requested.or(component.default_template()) {
            Some(name) => name.to_string(),
            None => provider.templates(component.name()).into_iter().next().ok_or_else(|| {
                RenderError::NoTemplates {
                    component: component.name().to_string(),
                }
            })?,
        };

        provider.resolve(component.name(), &name).ok_or_else(|| RenderError::TemplateNotFound {
            component: component.name().to_string(),
            template: name,
        })
    }

    fn render_rows(
        &self,
        template: &TemplateRef,
        rows: &[Row],
        locale: &str,
    ) -> Result<String, RenderError> {
        let provider = self.registry.template_provider();
        let mut html = String::new();
        for row in rows {
            let fragment =
                provider.render(template, row, locale).map_err(|source| RenderError::Template {
                    component: template.component().to_string(),
                    source,
                })?;
            html.push_str(&fragment);
        }
        Ok(html)
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
