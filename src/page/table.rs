//! Route table for pages.

use super::Page;
use crate::core::PagepartsError;
use crate::templating::Localization;

/// Maps request paths to pages.
///
/// Routes are stored with a trailing `/` and match by longest prefix: `/shop/`
/// serves `/shop/`, `/shop/12` and the bare `/shop`, while `/` catches every
/// path no other route claims.
///
/// Every route except `/` also gets translated aliases: when a locale's
/// message table translates the route name (the route without slashes), the
/// translation with spaces removed becomes an extra route for the same page.
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    pages: Vec<Page>,
    /// Route to page index; aliases included
    routes: Vec<(String, usize)>,
}

impl PageTable {
    pub fn new(pages: Vec<Page>, localization: &Localization) -> Result<Self, PagepartsError> {
        let mut table = Self::default();

        for (index, mut page) in pages.into_iter().enumerate() {
            let route = normalize_route(&page.route)?;
            if table.route_index(&route).is_some() {
                return Err(PagepartsError::InvalidRoute {
                    route,
                    reason: "route is registered more than once".to_string(),
                });
            }

            tracing::debug!("Adding route for page: {}", route);
            table.routes.push((route.clone(), index));
            page.route = route;
            table.pages.push(page);
        }

        // Aliases never shadow a configured route
        for (index, page) in table.pages.iter().enumerate() {
            if page.route.len() <= 1 {
                continue;
            }
            let name = page.route.replace('/', "");
            for locale in localization.locales() {
                let Some(translated) = localization.translate(&name, locale) else {
                    continue;
                };
                if translated == name {
                    continue;
                }
                let alias = format!("/{}/", translated.replace(' ', ""));
                if table.routes.iter().all(|(route, _)| *route != alias) {
                    tracing::debug!("Adding route for page: {} ({} alias of {})", alias, locale, page.route);
                    table.routes.push((alias, index));
                }
            }
        }

        Ok(table)
    }

    /// The page whose route is the longest prefix of `path`.
    pub fn resolve(&self, path: &str) -> Option<&Page> {
        self.matching_route(path).map(|(_, index)| &self.pages[*index])
    }

    /// The matching page together with the path its parameters come from.
    ///
    /// A bare path like `/shop` is served as the matched route `/shop/`, so the
    /// route name never turns into a path parameter.
    pub fn resolve_request<'a>(&'a self, path: &'a str) -> Option<(&'a Page, &'a str)> {
        let (route, index) = self.matching_route(path)?;
        let effective = if path.starts_with(route.as_str()) { path } else { route.as_str() };
        Some((&self.pages[*index], effective))
    }

    fn matching_route(&self, path: &str) -> Option<&(String, usize)> {
        self.routes
            .iter()
            .filter(|(route, _)| route_matches(route, path))
            .max_by_key(|(route, _)| route.len())
    }

    /// Configured pages, routes normalized.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Every route with the route of the page it serves, aliases included.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes
            .iter()
            .map(|(route, index)| (route.as_str(), self.pages[*index].route.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn route_index(&self, route: &str) -> Option<usize> {
        self.routes.iter().find(|(r, _)| r == route).map(|(_, index)| *index)
    }
}

/// Trim a route and give it a trailing slash; empty routes are rejected.
fn normalize_route(route: &str) -> Result<String, PagepartsError> {
    let trimmed = route.trim();
    if trimmed.is_empty() {
        return Err(PagepartsError::InvalidRoute {
            route: route.to_string(),
            reason: "no route given for page".to_string(),
        });
    }
    if !trimmed.starts_with('/') {
        return Err(PagepartsError::InvalidRoute {
            route: route.to_string(),
            reason: "routes must start with '/'".to_string(),
        });
    }

    let mut normalized = trimmed.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

fn route_matches(route: &str, path: &str) -> bool {
    path.starts_with(route) || route.strip_suffix('/').is_some_and(|bare| bare == path)
}
