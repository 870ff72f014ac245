//! Test utilities for pageparts
//!
//! Helpers shared by unit tests and the integration suite (enabled through the
//! `test-utils` feature):
//! - [`init_test_logging`] - one-time tracing setup that respects `RUST_LOG`
//! - [`fakes`] - data sources that record calls or fail on demand
//! - [`fixtures`] - registry builders and sample configuration files
//!
//! # Example
//!
//! ```rust,no_run
//! use pageparts::test_utils::{FixtureRegistry, row};
//! use pageparts::registry::Component;
//! use serde_json::json;
//!
//! let registry = FixtureRegistry::new()
//!     .template("item", "item", "<b>{{ title }}</b>")
//!     .component(Component::new("item"))
//!     .build();
//! assert!(registry.lookup("item").is_some());
//! let _ = row(json!({"title": "Lamp"}));
//! ```

pub mod fakes;
pub mod fixtures;

pub use fakes::{FailingDataSource, RecordingDataSource};
pub use fixtures::{ConfigFixture, FixtureRegistry, row, rows};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=pageparts=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
