//! The application: configuration turned into a request handler.
//!
//! [`App`] owns everything needed to answer a page request: the component
//! registry, the page table, the auth policy and the document shell. It is
//! immutable once built and can be shared across threads behind an `Arc`.
//!
//! ```rust,no_run
//! use pageparts::app::{App, PageRequest};
//! use pageparts::config::load_app_config;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let (config, base_dir) = load_app_config(Path::new("app.yml"))?;
//! let app = App::from_config(config, &base_dir)?;
//!
//! let response = app.handle(&PageRequest::new("/products/").with_locale("en"));
//! println!("{} {}", response.status(), response.body());
//! # Ok(())
//! # }
//! ```

mod validation;

pub use validation::{IssueKind, ValidationIssue};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::PagepartsError;
use crate::data::{DataSource, Row};
use crate::page::{
    AuthEvaluator, ClaimsAuthEvaluator, DEFAULT_DOCUMENT, Document, DocumentContext, Page,
    PageOrchestrator, PageTable,
};
use crate::registry::{Component, ComponentRegistry};
use crate::request::{AuthClaims, RequestContext};
use crate::templating::{Localization, TemplateRef, TeraTemplateProvider};

/// Name of the component rendered when an `auth` page is refused.
pub const LOGIN_COMPONENT: &str = "login";

/// An inbound page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub path: String,
    /// Requested locale; falls back to the `locale` claim, then the default
    pub locale: Option<String>,
    pub claims: AuthClaims,
    /// Error message shown by the login form, e.g. after a failed attempt
    pub error: Option<String>,
}

impl PageRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Outcome of handling a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    Html(String),
    Unauthorized,
    NotFound,
    /// Rendering failed; details are logged, never returned
    InternalError,
}

impl PageResponse {
    /// HTTP status code equivalent.
    pub fn status(&self) -> u16 {
        match self {
            PageResponse::Html(_) => 200,
            PageResponse::Unauthorized => 401,
            PageResponse::NotFound => 404,
            PageResponse::InternalError => 500,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            PageResponse::Html(html) => html,
            PageResponse::Unauthorized => "Unauthorized",
            PageResponse::NotFound => "Not found",
            PageResponse::InternalError => "Internal server error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PageResponse::Html(_))
    }
}

/// A loaded application.
pub struct App {
    title: String,
    debug: bool,
    localization: Localization,
    localization_json: String,
    orchestrator: PageOrchestrator,
    pages: PageTable,
    document: Document,
    auth: Arc<dyn AuthEvaluator>,
    template_tags: String,
}

impl App {
    /// Build an application from configuration with no programmatic bindings.
    pub fn from_config(config: AppConfig, base_dir: &Path) -> Result<Self, PagepartsError> {
        AppBuilder::new(config, base_dir).build()
    }

    pub fn builder(config: AppConfig, base_dir: &Path) -> AppBuilder {
        AppBuilder::new(config, base_dir)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn registry(&self) -> &ComponentRegistry {
        self.orchestrator.registry()
    }

    pub fn pages(&self) -> &PageTable {
        &self.pages
    }

    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    /// The page serving `path`, if any.
    pub fn page_for(&self, path: &str) -> Option<&Page> {
        self.pages.resolve(path)
    }

    /// Answer a request with the full document.
    pub fn handle(&self, request: &PageRequest) -> PageResponse {
        self.respond(request, true)
    }

    /// Answer a request with the rendered page parts only, without the document.
    pub fn handle_fragment(&self, request: &PageRequest) -> PageResponse {
        self.respond(request, false)
    }

    /// `<template>` tags carrying every component template, for client-side
    /// rendering. Ids are the component namespace joined with the template name.
    pub fn template_tags(&self) -> &str {
        &self.template_tags
    }

    /// Check every page and component without rendering.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let registry = self.registry();
        let provider = registry.template_provider();
        let limit = self.orchestrator.max_depth();
        let mut issues = Vec::new();

        for component in registry.components() {
            let templates = provider.templates(component.name());
            if templates.is_empty() {
                issues.push(ValidationIssue::component(IssueKind::NoTemplates {
                    component: component.name().to_string(),
                }));
            } else if let Some(template) = component.default_template() {
                if provider.resolve(component.name(), template).is_none() {
                    issues.push(ValidationIssue::component(IssueKind::MissingTemplate {
                        component: component.name().to_string(),
                        template: template.to_string(),
                    }));
                }
            }
        }

        for page in self.pages.pages() {
            for root in &page.parts {
                let depth = root.depth();
                if depth > limit {
                    issues.push(ValidationIssue::on_page(
                        &page.route,
                        vec![root.name.clone()],
                        IssueKind::TooDeep {
                            depth,
                            limit,
                        },
                    ));
                }

                root.walk(&mut |part, ancestors| {
                    let mut chain: Vec<String> = ancestors.iter().map(|s| s.to_string()).collect();
                    chain.push(part.name.clone());

                    let Some(component) = registry.lookup(&part.name) else {
                        issues.push(ValidationIssue::on_page(
                            &page.route,
                            chain,
                            IssueKind::UnknownComponent {
                                name: part.name.clone(),
                                suggestions: registry.suggest(&part.name),
                            },
                        ));
                        return;
                    };

                    if let Some(template) = part.template() {
                        if provider.resolve(component.name(), template).is_none() {
                            issues.push(ValidationIssue::on_page(
                                &page.route,
                                chain,
                                IssueKind::MissingTemplate {
                                    component: component.name().to_string(),
                                    template: template.to_string(),
                                },
                            ));
                        }
                    }
                });
            }
        }

        issues
    }

    fn respond(&self, request: &PageRequest, embed: bool) -> PageResponse {
        let Some((page, path)) = self.pages.resolve_request(&request.path) else {
            tracing::info!("No page for {}", request.path);
            return PageResponse::NotFound;
        };

        let ctx = self.request_context(request, path);
        if page.auth && !self.auth.is_authenticated(&ctx) {
            return self.login(request, &ctx);
        }

        tracing::info!("Rendering {} for {}", page.route, request.path);
        let content = match self.orchestrator.render(page, &ctx) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Rendering {} failed: {}", request.path, e);
                return PageResponse::InternalError;
            }
        };

        if !embed {
            return PageResponse::Html(content);
        }

        match self.render_document(content, ctx.locale()) {
            Ok(html) => PageResponse::Html(html),
            Err(e) => {
                tracing::error!("Rendering document for {} failed: {}", request.path, e);
                PageResponse::InternalError
            }
        }
    }

    fn request_context(&self, request: &PageRequest, path: &str) -> RequestContext {
        let locale = request
            .locale
            .as_deref()
            .or_else(|| request.claims.get("locale").map(String::as_str))
            .unwrap_or(self.localization.default_locale());

        let ctx = RequestContext::new(path, locale);
        if request.claims.is_empty() {
            ctx
        } else {
            ctx.with_claims(request.claims.clone())
        }
    }

    fn login(&self, request: &PageRequest, ctx: &RequestContext) -> PageResponse {
        if self.registry().lookup(LOGIN_COMPONENT).is_none() {
            return PageResponse::Unauthorized;
        }

        let mut data = Row::new();
        data.insert("uri".to_string(), request.path.clone().into());
        if let Some(error) = &request.error {
            data.insert("error".to_string(), error.clone().into());
        }

        tracing::info!("Rendering login for {}", request.path);
        match self.orchestrator.render_component(LOGIN_COMPONENT, &data, ctx) {
            Ok(html) => PageResponse::Html(html),
            Err(e) => {
                tracing::warn!("Rendering login failed: {}", e);
                PageResponse::Unauthorized
            }
        }
    }

    fn render_document(
        &self,
        content: String,
        locale: &str,
    ) -> Result<String, crate::templating::TemplateError> {
        self.document.render(&DocumentContext {
            title: self.title.clone(),
            locale: locale.to_string(),
            content,
            templates: self.template_tags.clone(),
            debug: self.debug,
            i18n: self.localization.messages_for(locale),
            localization_json: self.localization_json.clone(),
        })
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("title", &self.title)
            .field("orchestrator", &self.orchestrator)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

/// Builds an [`App`] from configuration plus programmatic overrides.
pub struct AppBuilder {
    config: AppConfig,
    base_dir: PathBuf,
    bindings: Vec<(String, Arc<dyn DataSource>)>,
    auth: Arc<dyn AuthEvaluator>,
}

impl AppBuilder {
    pub fn new(config: AppConfig, base_dir: &Path) -> Self {
        Self {
            config,
            base_dir: base_dir.to_path_buf(),
            bindings: Vec::new(),
            auth: Arc::new(ClaimsAuthEvaluator::default()),
        }
    }

    /// Bind a data source to a component, replacing configured rows.
    #[must_use]
    pub fn bind_data(mut self, name: impl Into<String>, source: Arc<dyn DataSource>) -> Self {
        self.bindings.push((name.into(), source));
        self
    }

    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AuthEvaluator>) -> Self {
        self.auth = auth;
        self
    }

    pub fn build(self) -> Result<App, PagepartsError> {
        let AppConfig {
            title,
            max_render_depth,
            autoescape,
            debug,
            components,
            pages,
            ..
        } = self.config.clone();
        let localization = self.config.localization();
        let localization_json = serde_json::to_string(&self.config.localization)?;

        let mut provider = TeraTemplateProvider::new(localization.clone(), autoescape);
        for component in &components {
            for template in &component.templates {
                let source = template.load(&component.name, &self.base_dir)?;
                provider.add_template(&component.name, &template.name, &source).map_err(|e| {
                    PagepartsError::TemplateLoad {
                        component: component.name.clone(),
                        template: template.name.clone(),
                        reason: e.format_with_context(),
                    }
                })?;
            }
        }

        let mut builder = ComponentRegistry::builder(Arc::new(provider));
        for config in components {
            let mut component = Component::new(config.name);
            if let Some(template) = config.default_template {
                component = component.with_default_template(template);
            }
            if let Some(data) = &config.data {
                component = component.with_data_source(data.to_source());
            }
            builder.register(component)?;
        }
        for (name, source) in self.bindings {
            builder.bind_data(name, source);
        }
        let registry = Arc::new(builder.build());

        let document_source = self.config.load_document(&self.base_dir)?;
        let document =
            Document::new(document_source.as_deref().unwrap_or(DEFAULT_DOCUMENT), autoescape)?;

        let pages = PageTable::new(pages, &localization)?;
        let template_tags = build_template_tags(&registry);

        tracing::info!(
            "Loaded {} with {} components and {} pages",
            if title.is_empty() { "application" } else { title.as_str() },
            registry.len(),
            pages.len()
        );

        Ok(App {
            title,
            debug,
            localization,
            localization_json,
            orchestrator: PageOrchestrator::new(registry).with_max_depth(max_render_depth),
            pages,
            document,
            auth: self.auth,
            template_tags,
        })
    }
}

fn build_template_tags(registry: &ComponentRegistry) -> String {
    let provider = registry.template_provider();
    let mut tags = String::new();
    for component in registry.components() {
        for name in provider.templates(component.name()) {
            let Some(source) = provider.source(&TemplateRef::new(component.name(), &name)) else {
                continue;
            };
            let id = match component.namespace() {
                "" => name.clone(),
                namespace => format!("{namespace}.{name}"),
            };
            tags.push_str(&format!("<template id=\"{id}\">{source}</template>\n"));
        }
    }
    tags
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
