//! Pages: route-addressed forests of parts.
//!
//! - [`Page`] is the configured unit: a route, an auth flag and root parts
//! - [`PageOrchestrator`] renders a page's roots and concatenates them
//! - [`PageTable`] resolves request paths to pages by longest route prefix
//! - [`AuthEvaluator`] decides whether a request may see an `auth` page
//! - [`Document`] is the HTML shell a rendered page is embedded into

mod auth;
mod document;
mod table;

pub use auth::{AuthEvaluator, ClaimsAuthEvaluator};
pub use document::{DEFAULT_DOCUMENT, Document, DocumentContext};
pub use table::PageTable;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{Escaper, SqlEscaper};
use crate::registry::ComponentRegistry;
use crate::render::{DEFAULT_MAX_RENDER_DEPTH, Part, PartRenderer, RenderError};
use crate::request::RequestContext;

/// A route and the parts rendered for it.
///
/// ```rust
/// use pageparts::page::Page;
///
/// let page: Page = serde_yaml::from_str(
///     "route: /products/\ncomponents:\n  - name: list\n",
/// ).unwrap();
/// assert!(!page.auth);
/// assert_eq!(page.parts[0].name, "list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub route: String,

    /// Only authenticated requests see this page
    #[serde(default)]
    pub auth: bool,

    #[serde(default, alias = "components")]
    pub parts: Vec<Part>,
}

impl Page {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }
}

/// Renders pages against a shared registry.
///
/// Holds no per-request state; one orchestrator serves every request and can be
/// shared across threads.
#[derive(Clone)]
pub struct PageOrchestrator {
    registry: Arc<ComponentRegistry>,
    escaper: Arc<dyn Escaper>,
    max_depth: usize,
}

impl PageOrchestrator {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            registry,
            escaper: Arc::new(SqlEscaper),
            max_depth: DEFAULT_MAX_RENDER_DEPTH,
        }
    }

    #[must_use]
    pub fn with_escaper(mut self, escaper: Arc<dyn Escaper>) -> Self {
        self.escaper = escaper;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Render every root part of `page` for `request_path` and concatenate.
    pub fn render_page(
        &self,
        page: &Page,
        request_path: &str,
        locale: &str,
    ) -> Result<String, RenderError> {
        self.render(page, &RequestContext::new(request_path, locale))
    }

    /// Like [`render_page`](Self::render_page) with a prepared request context.
    pub fn render(&self, page: &Page, ctx: &RequestContext) -> Result<String, RenderError> {
        let renderer = self.renderer();
        let mut html = String::new();
        for part in &page.parts {
            html.push_str(&renderer.render(part, ctx)?);
        }
        Ok(html)
    }

    /// Render one component with caller-supplied data, bypassing its data source.
    pub fn render_component(
        &self,
        name: &str,
        data: &crate::data::Row,
        ctx: &RequestContext,
    ) -> Result<String, RenderError> {
        self.renderer().render_component(name, None, data, ctx)
    }

    fn renderer(&self) -> PartRenderer<'_> {
        PartRenderer::new(&self.registry)
            .with_escaper(self.escaper.as_ref())
            .with_max_depth(self.max_depth)
    }
}

impl std::fmt::Debug for PageOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageOrchestrator")
            .field("registry", &self.registry)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
