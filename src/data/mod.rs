//! Data sources bound to components.
//!
//! A [`DataSource`] turns the (already escaped) path parameters of a request into
//! zero or more [`Row`]s. Each row is the data context of one template render.
//! Sources also see the [`RequestContext`], so rows can depend on the locale or
//! on the claims of an authenticated request.
//!
//! Two implementations ship with the crate:
//! - [`StaticDataSource`] - rows declared in configuration, optionally filtered
//!   by a key field against the first path parameter
//! - [`FnDataSource`] - any closure, for programmatic bindings
//!
//! Whether a failure is absorbed by the renderer or aborts the render is decided
//! by [`DataSourceError::is_recoverable`].

mod escape;
mod source;

pub use escape::{Escaper, NoEscape, SqlEscaper};
pub use source::{FnDataSource, StaticDataSource};

use thiserror::Error;

use crate::request::RequestContext;

/// One record returned by a data source: field name to value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Produces rows for a component from request path parameters.
///
/// Implementations are shared between concurrent renders and must not rely on
/// interior mutability for correctness.
pub trait DataSource: Send + Sync {
    /// Fetch rows for the given escaped path parameters.
    ///
    /// Claims and locale come from `ctx` and are not escaped. An empty result
    /// is not an error; the renderer falls back to child data.
    fn fetch(&self, params: &[String], ctx: &RequestContext) -> Result<Vec<Row>, DataSourceError>;

    /// Short label used in logs and listings.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

/// Failures reported by a [`DataSource`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// The query ran but failed
    #[error("query failed: {message}")]
    Query {
        /// Backend message
        message: String,
    },

    /// The backing store could not be reached
    #[error("data source unavailable: {message}")]
    Unavailable {
        /// Backend message
        message: String,
    },

    /// The binding itself is wrong (e.g. more parameters than placeholders).
    /// Retrying for another request cannot succeed, so the render fails.
    #[error("data source misconfigured: {message}")]
    Misconfigured {
        /// What is wrong with the binding
        message: String,
    },
}

impl DataSourceError {
    /// Whether the renderer may fall back to child-only data.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Misconfigured { .. })
    }
}
