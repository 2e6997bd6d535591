//! Escaping for the two contexts user text is interpolated into.

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text for the inside of a single-quoted JavaScript string literal.
///
/// Handles backslash, both quote characters, carriage return, line feed and tab.
#[must_use]
pub fn escape_js_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str(r"\\"),
            '\'' => result.push_str(r"\'"),
            '"' => result.push_str(r#"\""#),
            '\r' => result.push_str(r"\r"),
            '\n' => result.push_str(r"\n"),
            '\t' => result.push_str(r"\t"),
            _ => result.push(c),
        }
    }
    result
}
