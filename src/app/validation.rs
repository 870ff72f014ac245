//! Static checks over a loaded application.

use serde::Serialize;
use std::fmt;

/// A problem found without rendering anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Route of the page the issue was found on; `None` for component-level issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Part names from the page root down to the offending part
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<String>,
    #[serde(flatten)]
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IssueKind {
    UnknownComponent { name: String, suggestions: Vec<String> },
    MissingTemplate { component: String, template: String },
    NoTemplates { component: String },
    TooDeep { depth: usize, limit: usize },
}

impl ValidationIssue {
    pub(crate) fn component(kind: IssueKind) -> Self {
        Self {
            route: None,
            parts: Vec::new(),
            kind,
        }
    }

    pub(crate) fn on_page(route: &str, parts: Vec<String>, kind: IssueKind) -> Self {
        Self {
            route: Some(route.to_string()),
            parts,
            kind,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::UnknownComponent {
                name,
                suggestions,
            } => {
                write!(f, "Unknown component '{name}'")?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean {}?)", suggestions.join(", "))?;
                }
                Ok(())
            }
            IssueKind::MissingTemplate {
                component,
                template,
            } => write!(f, "Template '{template}' not found on component '{component}'"),
            IssueKind::NoTemplates {
                component,
            } => write!(f, "Component '{component}' has no templates"),
            IssueKind::TooDeep {
                depth,
                limit,
            } => write!(f, "Part tree is {depth} levels deep, the limit is {limit}"),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(route) = &self.route {
            write!(f, "{route}")?;
            if !self.parts.is_empty() {
                write!(f, " [{}]", self.parts.join(" > "))?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{}", self.kind)
    }
}
