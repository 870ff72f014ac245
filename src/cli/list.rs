//! List components and pages.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::app::App;
use crate::render::Part;

/// Show registered components with their templates and data, then every page
/// route with its part tree.
#[derive(Args, Debug)]
pub struct ListCommand {}

impl ListCommand {
    pub fn execute(self, app: &App) -> Result<()> {
        let registry = app.registry();
        let provider = registry.template_provider();

        println!("{}", "Components:".bold());
        for component in registry.components() {
            let templates = provider.templates(component.name());
            let data = component.data_source().map(|source| source.describe());
            println!(
                "  {} [{}]{}",
                component.name().cyan(),
                templates.join(", "),
                data.map(|d| format!(" data: {d}")).unwrap_or_default()
            );
        }

        println!("{}", "Pages:".bold());
        for page in app.pages().pages() {
            let auth = if page.auth { " (auth)".yellow().to_string() } else { String::new() };
            println!("  {}{}", page.route.green(), auth);
            for part in &page.parts {
                print_tree(part, 2);
            }
        }

        let aliases: Vec<_> = app.pages().routes().filter(|(route, page)| route != page).collect();
        if !aliases.is_empty() {
            println!("{}", "Aliases:".bold());
            for (alias, route) in aliases {
                println!("  {alias} → {route}");
            }
        }
        Ok(())
    }
}

fn print_tree(part: &Part, indent: usize) {
    let template = part.template().map(|t| format!(" ({t})")).unwrap_or_default();
    println!("{}{}{}", "  ".repeat(indent), part.name, template);
    for child in &part.children {
        print_tree(child, indent + 1);
    }
}
