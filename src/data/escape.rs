//! Sanitization of request-derived values before they reach a data source.

/// Escapes a single request parameter.
///
/// Data sources receive parameters that have already been passed through an
/// `Escaper`; they treat them as trusted.
pub trait Escaper: Send + Sync {
    /// Return the escaped form of `raw`.
    fn escape(&self, raw: &str) -> String;
}

/// MySQL-style string escaping.
///
/// Backslash-escapes NUL, newline, carriage return, backslash, both quote
/// characters and Ctrl-Z, so a parameter can be embedded in a quoted SQL
/// literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlEscaper;

impl Escaper for SqlEscaper {
    fn escape(&self, raw: &str) -> String {
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '\0' => escaped.push_str("\\0"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\\' => escaped.push_str("\\\\"),
                '\'' => escaped.push_str("\\'"),
                '"' => escaped.push_str("\\\""),
                '\x1a' => escaped.push_str("\\Z"),
                other => escaped.push(other),
            }
        }
        escaped
    }
}

/// Passes values through unchanged.
///
/// For data sources that never interpolate parameters into a query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscape;

impl Escaper for NoEscape {
    fn escape(&self, raw: &str) -> String {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_escaper_plain_values_unchanged() {
        assert_eq!(SqlEscaper.escape("product-12"), "product-12");
    }

    #[test]
    fn test_sql_escaper_quotes_and_backslashes() {
        assert_eq!(SqlEscaper.escape("o'brien"), "o\\'brien");
        assert_eq!(SqlEscaper.escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(SqlEscaper.escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_sql_escaper_control_characters() {
        assert_eq!(SqlEscaper.escape("a\nb\r\0"), "a\\nb\\r\\0");
        assert_eq!(SqlEscaper.escape("\x1a"), "\\Z");
    }

    #[test]
    fn test_no_escape_is_identity() {
        assert_eq!(NoEscape.escape("o'brien"), "o'brien");
    }
}
