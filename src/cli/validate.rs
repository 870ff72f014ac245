//! Validate an application without rendering it.
//!
//! Reports parts naming unknown components (with close matches), explicit or
//! default templates that do not exist, components without templates, and part
//! trees deeper than the render depth limit.
//!
//! ```bash
//! pageparts validate
//! pageparts validate --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::{App, ValidationIssue};

/// Check pages and components.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format options for validation results.
#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, one line per issue
    Text,
    /// A single JSON object
    Json,
}

/// Aggregated validation outcome, used for JSON output.
#[derive(Debug, Serialize)]
pub struct ValidationResults {
    pub valid: bool,
    pub components: usize,
    pub pages: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn execute(self, app: &App) -> Result<()> {
        let issues = app.validate();
        let results = ValidationResults {
            valid: issues.is_empty(),
            components: app.registry().len(),
            pages: app.pages().len(),
            issues,
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            OutputFormat::Text => print_text(&results),
        }

        if !results.valid {
            anyhow::bail!("Validation found {} issue(s)", results.issues.len());
        }
        Ok(())
    }
}

fn print_text(results: &ValidationResults) {
    if results.valid {
        println!(
            "{} {} components and {} pages are valid",
            "✓".green(),
            results.components,
            results.pages
        );
        return;
    }

    for issue in &results.issues {
        println!("{} {}", "✗".red(), issue);
    }
}
