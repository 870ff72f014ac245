//! Error handling for pageparts
//!
//! Two layers of errors exist:
//! - [`PagepartsError`] covers setup failures: loading configuration, building the
//!   component registry, reading template files, and registering page routes.
//! - [`RenderError`](crate::render::RenderError) covers failures while rendering a
//!   part tree for a request.
//!
//! The CLI funnels any error through [`user_friendly_error`], which produces an
//! [`ErrorContext`] with details and a suggestion where one is known.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pageparts::core::{PagepartsError, ErrorContext};
//!
//! let context = ErrorContext::new(PagepartsError::ConfigNotFound {
//!     path: "app.yml".to_string(),
//! })
//! .with_suggestion("Pass --config or create app.yml in the current directory");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::render::RenderError;

/// Setup-time errors for pageparts.
#[derive(Error, Debug, Clone)]
pub enum PagepartsError {
    /// Configuration file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Configuration file exists but could not be parsed
    #[error("Failed to parse configuration {path}: {reason}")]
    ConfigParse {
        /// Path of the configuration file
        path: String,
        /// Parser message
        reason: String,
    },

    /// Configuration format could not be derived from the file extension
    #[error("Unsupported configuration format for {path} (expected .yml, .yaml, .toml or .json)")]
    UnsupportedConfigFormat {
        /// Path of the configuration file
        path: String,
    },

    /// A component name is not a valid dot-separated identifier
    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Two components were registered under the same name
    #[error("Component '{name}' is registered more than once")]
    DuplicateComponent {
        /// The duplicated name
        name: String,
    },

    /// A page route is empty or duplicated
    #[error("Invalid page route '{route}': {reason}")]
    InvalidRoute {
        /// The offending route
        route: String,
        /// Why it was rejected
        reason: String,
    },

    /// A template could not be loaded or parsed
    #[error("Failed to load template '{template}' for component '{component}': {reason}")]
    TemplateLoad {
        /// Owning component
        component: String,
        /// Template name
        template: String,
        /// Loader or parser message
        reason: String,
    },

    /// The document template could not be loaded or parsed
    #[error("Failed to load document template: {reason}")]
    DocumentLoad {
        /// Loader or parser message
        reason: String,
    },

    /// Configuration data that could not be serialized (e.g. for the document)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O failure outside of the cases above
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for PagepartsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PagepartsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Error wrapper carrying optional user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// Human readable error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from any displayable error.
    #[must_use]
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            message: error.to_string(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert an error into an [`ErrorContext`] with contextual suggestions.
///
/// Known error types ([`PagepartsError`], [`RenderError`], [`std::io::Error`]) get
/// tailored suggestions. Anything else keeps its full `anyhow` chain as the message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(err) = error.downcast_ref::<PagepartsError>() {
        return create_error_context(err);
    }

    if let Some(err) = error.downcast_ref::<RenderError>() {
        return create_render_error_context(err);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(&error)
                    .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(&error)
                    .with_suggestion("Check file ownership and permissions");
            }
            _ => {}
        }
    }

    ErrorContext::new(format!("{error:#}"))
}

fn create_error_context(error: &PagepartsError) -> ErrorContext {
    match error {
        PagepartsError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create app.yml in the current directory, pass --config, or set PAGEPARTS_CONFIG"),
        PagepartsError::ConfigParse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the configuration syntax and field names"),
        PagepartsError::UnsupportedConfigFormat {
            ..
        } => ErrorContext::new(error).with_suggestion("Rename the configuration file to app.yml"),
        PagepartsError::InvalidComponentName {
            ..
        } => ErrorContext::new(error)
            .with_details("Component names are dot-separated segments such as 'shop.product.card'")
            .with_suggestion("Use only letters, digits, '-' and '_' inside each segment"),
        PagepartsError::DuplicateComponent {
            ..
        } => ErrorContext::new(error).with_suggestion("Remove or rename one of the components"),
        PagepartsError::InvalidRoute {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Every page needs a unique, non-empty route such as '/products/'"),
        PagepartsError::TemplateLoad {
            ..
        }
        | PagepartsError::DocumentLoad {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the template path and its Tera syntax"),
        PagepartsError::Serialization(_) | PagepartsError::Io(_) => ErrorContext::new(error),
    }
}

fn create_render_error_context(error: &RenderError) -> ErrorContext {
    let ctx = match error {
        RenderError::ComponentNotFound {
            suggestions,
            ..
        } if !suggestions.is_empty() => ErrorContext::new(error)
            .with_suggestion(format!("Did you mean: {}?", suggestions.join(", "))),
        RenderError::ComponentNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Declare the component in the 'components' section of the configuration"),
        RenderError::DepthExceeded {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Flatten the part tree or raise max_render_depth"),
        RenderError::Template {
            source,
            ..
        } => return ErrorContext::new(error).with_details(source.format_with_context()),
        _ => ErrorContext::new(error),
    };

    match error.chain() {
        [] => ctx,
        chain => ctx.with_details(format!("Inside part {}", chain.join(" > "))),
    }
}
