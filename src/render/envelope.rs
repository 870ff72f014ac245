//! The element every rendered part is wrapped in.

/// Wrap `html` in an element named after the part.
///
/// `<list data-component="list">…</list>`; the tag is the lowercased name, the
/// attribute keeps the name as written.
pub fn wrap(name: &str, html: &str) -> String {
    let tag = name.to_lowercase();
    let marker = escape_attr(name);
    let mut out = String::with_capacity(html.len() + 2 * tag.len() + marker.len() + 24);
    out.push('<');
    out.push_str(&tag);
    out.push_str(" data-component=\"");
    out.push_str(&marker);
    out.push_str("\">");
    out.push_str(html);
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
