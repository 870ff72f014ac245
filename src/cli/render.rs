//! Render request paths.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::sync::Arc;

use crate::app::{App, PageRequest, PageResponse};

/// Render one or more request paths and print the HTML.
///
/// Paths render concurrently against one shared application; output keeps the
/// order of the arguments. Any path that does not answer 200 fails the command.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Request paths, e.g. `/products/` or `/product/12:red`
    #[arg(required = true)]
    paths: Vec<String>,

    /// Locale for every request (defaults to the configured default locale)
    #[arg(short, long)]
    locale: Option<String>,

    /// Auth claim as KEY=VALUE; repeatable
    #[arg(long = "claim", value_name = "KEY=VALUE", value_parser = parse_claim)]
    claims: Vec<(String, String)>,

    /// Print only the rendered parts, without the document
    #[arg(long)]
    fragment: bool,
}

impl RenderCommand {
    pub async fn execute(self, app: App) -> Result<()> {
        let app = Arc::new(app);

        let mut tasks = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let app = Arc::clone(&app);
            let request = self.request(path);
            let fragment = self.fragment;
            tasks.push(tokio::task::spawn_blocking(move || {
                if fragment { app.handle_fragment(&request) } else { app.handle(&request) }
            }));
        }

        let mut failures = Vec::new();
        for (path, task) in self.paths.iter().zip(tasks) {
            let response: PageResponse =
                task.await.with_context(|| format!("Render task for {path} did not complete"))?;

            if response.is_success() {
                if self.paths.len() > 1 {
                    println!("<!-- {path} -->");
                }
                println!("{}", response.body());
            } else {
                eprintln!("{} {} {} {}", "✗".red(), path, response.status(), response.body());
                failures.push(format!("{path} ({})", response.status()));
            }
        }

        if !failures.is_empty() {
            anyhow::bail!("Failed to render {}", failures.join(", "));
        }
        Ok(())
    }

    fn request(&self, path: &str) -> PageRequest {
        let mut request = PageRequest::new(path);
        if let Some(locale) = &self.locale {
            request = request.with_locale(locale.clone());
        }
        for (key, value) in &self.claims {
            request = request.with_claim(key.clone(), value.clone());
        }
        request
    }
}

fn parse_claim(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim() {
        assert_eq!(parse_claim("authenticated=true").unwrap(), ("authenticated".into(), "true".into()));
        assert_eq!(parse_claim("note=a=b").unwrap(), ("note".into(), "a=b".into()));
        assert!(parse_claim("=x").is_err());
        assert!(parse_claim("novalue").is_err());
    }

    #[test]
    fn test_request_carries_locale_and_claims() {
        let cmd = RenderCommand {
            paths: vec!["/a/".into()],
            locale: Some("en".into()),
            claims: vec![("authenticated".into(), "true".into())],
            fragment: false,
        };
        let request = cmd.request("/a/");
        assert_eq!(request.locale.as_deref(), Some("en"));
        assert_eq!(request.claims.get("authenticated").map(String::as_str), Some("true"));
    }
}
