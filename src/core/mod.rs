//! Core error types shared across pageparts.
//!
//! - [`PagepartsError`] - setup failures (configuration, registry, templates, routes)
//! - [`ErrorContext`] - user-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - convert any `anyhow::Error` for CLI display
//!
//! # Examples
//!
//! ```rust
//! use pageparts::core::{PagepartsError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn load() -> Result<()> {
//!     Err(PagepartsError::ConfigNotFound { path: "app.yml".into() }.into())
//! }
//!
//! if let Err(e) = load() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, PagepartsError, user_friendly_error};
