//! Per-request render context.

use std::collections::BTreeMap;

/// Claims attached to an authenticated request (e.g. a decoded token payload).
pub type AuthClaims = BTreeMap<String, String>;

/// Everything a render pass needs to know about the inbound request.
///
/// Built once per request and passed by reference through the whole part tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    path_params: Vec<String>,
    locale: String,
    claims: Option<AuthClaims>,
}

impl RequestContext {
    /// Build a context for `path`, deriving the path parameters from it.
    pub fn new(path: impl Into<String>, locale: impl Into<String>) -> Self {
        let path = path.into();
        let path_params = parse_path_params(&path);
        Self {
            path,
            path_params,
            locale: locale.into(),
            claims: None,
        }
    }

    /// Attach auth claims.
    #[must_use]
    pub fn with_claims(mut self, claims: AuthClaims) -> Self {
        self.claims = Some(claims);
        self
    }

    /// The raw request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Unescaped path parameters, in order.
    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    /// Locale used for template rendering.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Auth claims, if the request carried any.
    pub fn claims(&self) -> Option<&AuthClaims> {
        self.claims.as_ref()
    }

    /// Look up a single claim.
    pub fn claim(&self, key: &str) -> Option<&str> {
        self.claims.as_ref()?.get(key).map(String::as_str)
    }
}

/// Split the last path segment on `:` into parameters.
///
/// `/product/12:red` yields `["12", "red"]`. Pieces are trimmed and empty pieces
/// dropped, so `/product/` and `/product/ : ` yield no parameters.
pub fn parse_path_params(path: &str) -> Vec<String> {
    let last = path.rsplit('/').next().unwrap_or_default();
    last.split(':')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
