//! Command-line interface for pageparts.
//!
//! # Commands
//!
//! - `render` - Render one or more request paths to stdout
//! - `validate` - Check pages and components without rendering
//! - `list` - Show components, templates and page routes
//!
//! # Global Options
//!
//! - `-v, --verbose` - Debug logging
//! - `-q, --quiet` - Errors only
//! - `-c, --config <PATH>` - Application configuration (default `app.yml`,
//!   also read from `PAGEPARTS_CONFIG`)
//!
//! # Examples
//!
//! ```bash
//! pageparts render /products/ /product/12 --locale en
//! pageparts render /account/ --claim authenticated=true --fragment
//! pageparts validate --format json
//! pageparts -c site/app.toml list
//! ```

mod list;
mod render;
pub mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, load_app_config};

/// Main CLI structure for pageparts.
#[derive(Parser)]
#[command(
    name = "pageparts",
    about = "Render component part trees into HTML pages",
    version,
    long_about = "pageparts composes pages from reusable components. Each page is a tree of parts; \
                  children render first and their HTML becomes data for their parent."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the application configuration
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render request paths to stdout
    Render(render::RenderCommand),

    /// Check pages and components for problems
    Validate(validate::ValidateCommand),

    /// List components and pages
    List(list::ListCommand),
}

impl Cli {
    /// Set up logging, load the application and run the command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let config_path = self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let app = load_app(&config_path)?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(app).await,
            Commands::Validate(cmd) => cmd.execute(&app),
            Commands::List(cmd) => cmd.execute(&app),
        }
    }

    /// Logging goes to stderr so rendered HTML on stdout stays clean.
    ///
    /// `--verbose` and `--quiet` win over `RUST_LOG`; without either the
    /// environment decides, defaulting to warnings.
    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("pageparts=debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

fn load_app(path: &Path) -> Result<App> {
    let (config, base_dir) = load_app_config(path)?;
    Ok(App::from_config(config, &base_dir)?)
}
