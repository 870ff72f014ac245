//! Integration test suite for pageparts
//!
//! End-to-end tests over the public API and the `pageparts` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli_render**: `pageparts render` against configuration on disk
//! - **cli_validate**: `pageparts validate` and `pageparts list`
//! - **config_parsing**: YAML/TOML/JSON application configuration
//! - **page_rendering**: part trees, pages and apps through the library API

mod cli_render;
mod cli_validate;
mod config_parsing;
mod page_rendering;
