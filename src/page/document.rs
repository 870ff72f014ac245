//! The HTML document a rendered page is embedded into.

use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context as TeraContext, Tera};

use crate::core::PagepartsError;
use crate::templating::{ErrorLocation, TemplateError, format_tera_error};

const DOCUMENT_KEY: &str = "document.html";

/// Shell used when the configuration names no document template.
pub const DEFAULT_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="{{ locale }}">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
</head>
<body data-debug="{{ debug }}">
{{ content | safe }}
{{ templates | safe }}
<script type="application/json" id="localization">{{ localization_json | safe }}</script>
</body>
</html>
"#;

/// Values available to the document template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentContext {
    pub title: String,
    pub locale: String,
    /// Rendered page parts
    pub content: String,
    /// `<template>` tags for client-side rendering
    pub templates: String,
    pub debug: bool,
    /// Messages for `locale`
    pub i18n: BTreeMap<String, String>,
    /// Every locale's message table, serialized
    pub localization_json: String,
}

/// A parsed document template.
pub struct Document {
    tera: Tera,
}

impl Document {
    pub fn new(source: &str, autoescape: bool) -> Result<Self, PagepartsError> {
        let mut tera = Tera::default();
        if !autoescape {
            tera.autoescape_on(vec![]);
        }
        tera.add_raw_template(DOCUMENT_KEY, source).map_err(|e| PagepartsError::DocumentLoad {
            reason: format_tera_error(&e),
        })?;
        Ok(Self {
            tera,
        })
    }

    pub fn render(&self, context: &DocumentContext) -> Result<String, TemplateError> {
        let context = TeraContext::from_serialize(context).map_err(|e| TemplateError::RenderFailed {
            message: format_tera_error(&e),
            location: Box::new(ErrorLocation::new("document", "document")),
        })?;
        self.tera.render(DOCUMENT_KEY, &context).map_err(|e| TemplateError::RenderFailed {
            message: format_tera_error(&e),
            location: Box::new(ErrorLocation::new("document", "document")),
        })
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}
