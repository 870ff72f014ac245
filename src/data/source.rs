//! Built-in [`DataSource`] implementations.

use std::fmt;

use super::{DataSource, DataSourceError, Row};
use crate::request::RequestContext;

/// Rows declared up front, typically in the application configuration.
///
/// Without a key field every request receives all rows. With a key field only
/// rows whose key value matches the first path parameter are returned; a
/// request without parameters still receives all rows.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    rows: Vec<Row>,
    key: Option<String>,
}

impl StaticDataSource {
    /// Serve `rows` to every request.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            key: None,
        }
    }

    /// Filter rows by `key` against the first path parameter.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    fn matches(row: &Row, key: &str, wanted: &str) -> bool {
        match row.get(key) {
            Some(serde_json::Value::String(s)) => s == wanted,
            Some(serde_json::Value::Number(n)) => n.to_string() == wanted,
            Some(serde_json::Value::Bool(b)) => b.to_string() == wanted,
            _ => false,
        }
    }
}

impl DataSource for StaticDataSource {
    fn fetch(&self, params: &[String], _ctx: &RequestContext) -> Result<Vec<Row>, DataSourceError> {
        match (&self.key, params.first()) {
            (Some(key), Some(wanted)) => Ok(self
                .rows
                .iter()
                .filter(|row| Self::matches(row, key, wanted))
                .cloned()
                .collect()),
            _ => Ok(self.rows.clone()),
        }
    }

    fn describe(&self) -> String {
        match &self.key {
            Some(key) => format!("static ({} rows, key '{}')", self.rows.len(), key),
            None => format!("static ({} rows)", self.rows.len()),
        }
    }
}

/// Adapts a closure into a [`DataSource`].
///
/// ```rust
/// use pageparts::data::{DataSource, FnDataSource, Row};
/// use pageparts::request::{AuthClaims, RequestContext};
///
/// let source = FnDataSource::new(|params: &[String], ctx: &RequestContext| {
///     let mut row = Row::new();
///     row.insert("id".into(), params.first().cloned().unwrap_or_default().into());
///     row.insert("user".into(), ctx.claim("sub").unwrap_or("guest").into());
///     Ok(vec![row])
/// });
/// let claims = AuthClaims::from([("sub".to_string(), "jos".to_string())]);
/// let ctx = RequestContext::new("/order/42", "nl").with_claims(claims);
/// let rows = source.fetch(ctx.path_params(), &ctx).unwrap();
/// assert_eq!(rows[0]["id"], "42");
/// assert_eq!(rows[0]["user"], "jos");
/// ```
pub struct FnDataSource<F> {
    func: F,
}

impl<F> FnDataSource<F>
where
    F: Fn(&[String], &RequestContext) -> Result<Vec<Row>, DataSourceError> + Send + Sync,
{
    /// Wrap `func`.
    pub fn new(func: F) -> Self {
        Self {
            func,
        }
    }
}

impl<F> DataSource for FnDataSource<F>
where
    F: Fn(&[String], &RequestContext) -> Result<Vec<Row>, DataSourceError> + Send + Sync,
{
    fn fetch(&self, params: &[String], ctx: &RequestContext) -> Result<Vec<Row>, DataSourceError> {
        (self.func)(params, ctx)
    }

    fn describe(&self) -> String {
        "function".to_string()
    }
}

impl<F> fmt::Debug for FnDataSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDataSource").finish_non_exhaustive()
    }
}
