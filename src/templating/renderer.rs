//! Template rendering engine with Tera.
//!
//! [`TeraTemplateProvider`] holds every component template in one `Tera`
//! instance, keyed as `<component>/<template>.html`. Templates are parsed once
//! when added; rendering only borrows the instance, so one provider serves
//! concurrent requests without locking.

use regex::Regex;
use std::collections::HashMap;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};
use super::localization::Localization;
use super::{TemplateProvider, TemplateRef};
use crate::data::Row;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

#[derive(Debug, Clone)]
struct TemplateEntry {
    name: String,
    source: String,
}

/// [`TemplateProvider`] backed by Tera.
///
/// Every render receives `locale` and `i18n` (the message table for that
/// locale) in its context; row fields are inserted afterwards and win on
/// collision.
///
/// With autoescaping on (the default) row values are HTML-escaped, so templates
/// insert child part output with the `safe` filter: `{{ item | safe }}`.
pub struct TeraTemplateProvider {
    tera: Tera,
    /// Component name to its templates, in declaration order
    templates: HashMap<String, Vec<TemplateEntry>>,
    localization: Localization,
}

impl TeraTemplateProvider {
    pub fn new(localization: Localization, autoescape: bool) -> Self {
        let mut tera = Tera::default();
        if !autoescape {
            tera.autoescape_on(vec![]);
        }
        Self {
            tera,
            templates: HashMap::new(),
            localization,
        }
    }

    /// Parse and register a template for `component`.
    ///
    /// Re-adding a name replaces the earlier source but keeps its position.
    pub fn add_template(
        &mut self,
        component: &str,
        name: &str,
        source: &str,
    ) -> Result<(), TemplateError> {
        let key = Self::key(component, name);
        self.tera.add_raw_template(&key, source).map_err(|e| TemplateError::SyntaxError {
            message: format_tera_error(&e),
            location: Box::new(ErrorLocation::new(component, name)),
        })?;

        let entries = self.templates.entry(component.to_string()).or_default();
        match entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.source = source.to_string(),
            None => entries.push(TemplateEntry {
                name: name.to_string(),
                source: source.to_string(),
            }),
        }

        tracing::debug!("Registered template {}", key);
        Ok(())
    }

    fn key(component: &str, name: &str) -> String {
        format!("{}/{}.html", component, name)
    }

    fn build_context(&self, row: &Row, locale: &str) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert("locale", locale);
        context.insert("i18n", &self.localization.messages_for(locale));
        for (key, value) in row {
            context.insert(key.as_str(), value);
        }
        context
    }
}

impl TemplateProvider for TeraTemplateProvider {
    fn templates(&self, component: &str) -> Vec<String> {
        self.templates
            .get(component)
            .map(|entries| entries.iter().map(|entry| entry.name.clone()).collect())
            .unwrap_or_default()
    }

    fn resolve(&self, component: &str, template: &str) -> Option<TemplateRef> {
        self.templates
            .get(component)?
            .iter()
            .any(|entry| entry.name == template)
            .then(|| TemplateRef::new(component, template))
    }

    fn render(
        &self,
        template: &TemplateRef,
        row: &Row,
        locale: &str,
    ) -> Result<String, TemplateError> {
        let context = self.build_context(row, locale);
        let key = Self::key(template.component(), template.name());

        self.tera.render(&key, &context).map_err(|e| {
            parse_tera_error(&e, self.source(template).unwrap_or_default(), &context, template)
        })
    }

    fn source(&self, template: &TemplateRef) -> Option<&str> {
        self.templates
            .get(template.component())?
            .iter()
            .find(|entry| entry.name == template.name())
            .map(|entry| entry.source.as_str())
    }
}

/// Parse a Tera error into a structured [`TemplateError`].
fn parse_tera_error(
    error: &tera::Error,
    template_source: &str,
    context: &TeraContext,
    template: &TemplateRef,
) -> TemplateError {
    let line_number = extract_line_from_tera_error(error);
    let context_lines = line_number
        .map(|line| extract_context_lines(template_source, line, 3))
        .filter(|lines| !lines.is_empty());

    let mut location = ErrorLocation::new(template.component(), template.name());
    location.line_number = line_number;
    location.context_lines = context_lines;

    // Tera wraps the interesting message in "Failed to render ..."; search the
    // whole chain.
    let chain = error_chain(error).join("\n");
    if let Some(variable) = extract_variable_name(&chain) {
        let available_variables = extract_available_variables(context);
        let suggestions = find_similar_variables(&variable, &available_variables);
        return TemplateError::VariableNotFound {
            variable,
            available_variables: Box::new(available_variables),
            suggestions: Box::new(suggestions),
            location: Box::new(location),
        };
    }

    TemplateError::RenderFailed {
        message: format_tera_error(error),
        location: Box::new(location),
    }
}

fn error_chain(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

/// Extract variable name from "Variable `foo` not found" message
fn extract_variable_name(error_msg: &str) -> Option<String> {
    let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
    if let Some(m) = re.captures(error_msg).and_then(|caps| caps.get(1)) {
        return Some(m.as_str().to_string());
    }

    let re2 = Regex::new(r"Unknown variable `([^`]+)`").ok()?;
    re2.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Top-level keys of the context plus one level of nested object keys.
fn extract_available_variables(context: &TeraContext) -> Vec<String> {
    let mut vars = Vec::new();
    if let serde_json::Value::Object(map) = context.clone().into_json() {
        for (key, value) in map {
            vars.push(key.clone());
            if let serde_json::Value::Object(nested) = value {
                vars.extend(nested.keys().map(|inner| format!("{}.{}", key, inner)));
            }
        }
    }
    vars.sort();
    vars
}

/// Find similar variable names using Levenshtein distance
fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> =
        available.iter().map(|var| (var.clone(), levenshtein(target, var))).collect();

    scored.sort_by_key(|(_, dist)| *dist);

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(var, _)| var)
        .collect()
}

/// Up to `context_size` lines before and after the error line, 1-indexed.
fn extract_context_lines(
    content: &str,
    error_line: usize,
    context_size: usize,
) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return Vec::new();
    }

    let start = error_line.saturating_sub(context_size + 1);
    let end = (error_line + context_size).min(total_lines);

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(idx, line)| (start + idx + 1, line.to_string()))
        .collect()
}

/// Tera includes `line:column` in parse error messages, e.g. "1:7".
fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
    let error_msg = format!("{:?}", error);

    let re = Regex::new(r"(\d+):(\d+)").ok()?;
    re.captures(&error_msg)
        .and_then(|caps| caps.get(1))
        .and_then(|line| line.as_str().parse::<usize>().ok())
}

/// Flatten a Tera error chain into one readable message.
///
/// Internal template keys are kept since they name the component and template.
pub fn format_tera_error(error: &tera::Error) -> String {
    let messages: Vec<String> = error_chain(error)
        .into_iter()
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty())
        .collect();

    if messages.is_empty() {
        "Template error (no details reported)".to_string()
    } else {
        messages.join("\n  → ")
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
