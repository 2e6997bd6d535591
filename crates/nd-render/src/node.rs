//! Declaration tree: elements, text, and ordered attributes.

use std::str::FromStr;

use crate::error::RenderError;

/// A node in a component declaration tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children.
    Element(Element),
    /// Text content (unescaped).
    Text(String),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this is a text node containing only whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element declaration.
///
/// # Example
///
/// ```
/// use nd_render::{Element, Node};
///
/// let tabs = Element::new("nd-tabs")
///     .with_child(Element::new("nd-tab-item").with_attr("title", "One").with_text("First"));
///
/// assert_eq!(tabs.children.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes in document order.
    pub attrs: Attributes,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Add a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Attribute value, or `default` when absent.
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attrs.get(name).unwrap_or(default)
    }

    /// Non-empty attribute value.
    pub fn attr_non_empty(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).filter(|v| !v.is_empty())
    }

    /// Boolean attribute.
    ///
    /// An empty value or `true` is true, `false` is false, absence yields
    /// `default`. Anything else is an [`RenderError::InvalidAttribute`].
    pub fn bool_attr(&self, name: &str, default: bool) -> Result<bool, RenderError> {
        match self.attrs.get(name) {
            None => Ok(default),
            Some(v) if v.is_empty() || v.eq_ignore_ascii_case("true") || v == name => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
            Some(v) => Err(self.invalid(name, v, "expected true or false")),
        }
    }

    /// Parsed attribute value, or `default` when absent.
    pub fn parsed_attr<T: FromStr>(&self, name: &str, default: T) -> Result<T, RenderError> {
        match self.attrs.get(name) {
            None => Ok(default),
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| self.invalid(name, v, std::any::type_name::<T>())),
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    fn invalid(&self, name: &str, value: &str, expected: &str) -> RenderError {
        RenderError::InvalidAttribute {
            tag: self.tag.clone(),
            name: name.to_owned(),
            value: value.to_owned(),
            expected: expected.to_owned(),
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Attributes in document order.
///
/// Setting an existing name replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a value, replacing any existing value with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    /// Whether an attribute with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_attributes_keep_order_and_replace() {
        let attrs: Attributes = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn test_bool_attr() {
        let el = Element::new("x")
            .with_attr("a", "")
            .with_attr("b", "false")
            .with_attr("c", "TRUE")
            .with_attr("d", "d")
            .with_attr("e", "maybe");

        assert!(el.bool_attr("a", false).unwrap());
        assert!(!el.bool_attr("b", true).unwrap());
        assert!(el.bool_attr("c", false).unwrap());
        assert!(el.bool_attr("d", false).unwrap());
        assert!(el.bool_attr("missing", true).unwrap());
        assert!(matches!(
            el.bool_attr("e", false),
            Err(RenderError::InvalidAttribute { ref name, .. }) if name == "e"
        ));
    }

    #[test]
    fn test_parsed_attr() {
        let el = Element::new("x").with_attr("n", " 25 ").with_attr("bad", "ten");
        assert_eq!(el.parsed_attr("n", 10_usize).unwrap(), 25);
        assert_eq!(el.parsed_attr("missing", 10_usize).unwrap(), 10);
        assert!(el.parsed_attr("bad", 10_usize).is_err());
    }

    #[test]
    fn test_attr_helpers() {
        let el = Element::new("x").with_attr("empty", "").with_attr("href", "/a");
        assert_eq!(el.attr_or("missing", "dflt"), "dflt");
        assert_eq!(el.attr_non_empty("empty"), None);
        assert_eq!(el.attr_non_empty("href"), Some("/a"));
    }

    #[test]
    fn test_text_content() {
        let el = Element::new("p")
            .with_text("Hello ")
            .with_child(Element::new("strong").with_text("world"));
        assert_eq!(el.text_content(), "Hello world");
    }

    #[test]
    fn test_blank_node() {
        assert!(Node::text("  \n ").is_blank());
        assert!(!Node::text("x").is_blank());
        assert!(!Node::from(Element::new("br")).is_blank());
    }
}
