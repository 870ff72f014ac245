//! Structured template errors.
//!
//! Tera reports failures as a chain of strings. These types keep the parts a
//! user needs to fix a template: which component and template failed, the line,
//! the surrounding source, and close matches for a misspelled variable.

/// Template errors with location context.
#[derive(Debug, Clone)]
pub enum TemplateError {
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    RenderFailed {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Where a template error happened.
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Component owning the template
    pub component: String,
    /// Template name within the component
    pub template: String,
    /// Line number if Tera reported one
    pub line_number: Option<usize>,
    /// Source lines around the error, 1-indexed
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl ErrorLocation {
    pub fn new(component: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            template: template.into(),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                location,
                ..
            } => {
                write!(
                    f,
                    "Template variable not found: '{}' in {}/{}",
                    variable, location.component, location.template
                )
            }
            TemplateError::SyntaxError {
                message,
                location,
            } => {
                write!(
                    f,
                    "Template syntax error in {}/{}: {}",
                    location.component, location.template, message
                )
            }
            TemplateError::RenderFailed {
                message,
                location,
            } => {
                write!(
                    f,
                    "Template rendering failed in {}/{}: {}",
                    location.component, location.template, message
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            }
            | TemplateError::RenderFailed {
                location,
                ..
            } => location,
        }
    }

    /// Generate a multi-line message with source context and suggestions.
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_message_error("Template Syntax Error", message, location),
            TemplateError::RenderFailed {
                message,
                location,
            } => format_message_error("Template Rendering Failed", message, location),
        }
    }
}

fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {}\n", variable));
    push_location(&mut msg, location);

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables in this context:\n");
        for var in available_variables.iter().take(10) {
            msg.push_str(&format!("  {}\n", var));
        }
        if available_variables.len() > 10 {
            msg.push_str(&format!("  ... and {} more\n", available_variables.len() - 10));
        }
        msg.push('\n');
    }

    msg
}

fn format_message_error(title: &str, message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str(&format!("ERROR: {}\n\n", title));
    msg.push_str(&format!("Error: {}\n", message));
    push_location(&mut msg, location);

    msg.push_str("SUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Invalid filter names\n");
    msg.push_str("  - Child output inserted without the `safe` filter\n\n");

    msg
}

fn push_location(msg: &mut String, location: &ErrorLocation) {
    msg.push_str(&format!("Template: {}/{}\n", location.component, location.template));
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push('\n');

    if let Some(lines) = &location.context_lines {
        for (number, text) in lines {
            let marker = if Some(*number) == location.line_number {
                ">"
            } else {
                " "
            };
            msg.push_str(&format!("{} {:>4} | {}\n", marker, number, text));
        }
        msg.push('\n');
    }
}
