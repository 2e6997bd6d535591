//! HTML writing helpers shared by the renderer and built-in components.

use std::fmt::Write;

use nd_state::escape_html;

use crate::node::Attributes;

/// Elements that never have content and are written self-closed.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `tag` is an HTML void element.
pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}

/// Append ` name="value"` with the value HTML-escaped.
///
/// An empty value is written as a bare attribute name.
pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        let _ = write!(out, " {name}");
    } else {
        let _ = write!(out, r#" {name}="{}""#, escape_html(value));
    }
}

/// Append an opening tag with escaped attributes, without the closing `>`.
pub(crate) fn push_open_tag(out: &mut String, tag: &str, attrs: &Attributes) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs.iter() {
        push_attr(out, name, value);
    }
}
