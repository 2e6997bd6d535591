//! Markup parser for component declarations.
//!
//! Declarations are written as well-formed markup: every element is closed
//! (`<br />` rather than `<br>`), while attributes may follow HTML rules and
//! omit their value (`<nd-accordion multiple>`).

mod entities;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::RenderError;
use crate::node::{Attributes, Element, Node};

use entities::{convert_html_entities, decode_entity};

/// Nesting limit applied by [`parse_markup`].
pub const DEFAULT_PARSE_DEPTH: usize = 1024;

/// Parse markup into a list of top-level nodes.
///
/// Elements nested [`DEFAULT_PARSE_DEPTH`] levels deep are rejected; use
/// [`parse_markup_with_depth`] for another limit.
///
/// # Example
///
/// ```
/// use nd_render::{Node, parse_markup};
///
/// let nodes = parse_markup(r#"<nd-tabs><nd-tab-item title="A">One</nd-tab-item></nd-tabs>"#).unwrap();
/// let Node::Element(tabs) = &nodes[0] else { panic!("expected element") };
/// assert_eq!(tabs.tag, "nd-tabs");
/// assert_eq!(tabs.children.len(), 1);
/// ```
pub fn parse_markup(markup: &str) -> Result<Vec<Node>, RenderError> {
    parse_markup_with_depth(markup, DEFAULT_PARSE_DEPTH)
}

/// Parse markup, rejecting elements nested `max_depth` or more levels deep.
///
/// Top-level elements are at depth 0, matching the renderer's depth guard.
///
/// # Errors
///
/// Returns [`RenderError::DepthExceeded`] at the first element past the
/// limit, before any deeper input is read.
pub fn parse_markup_with_depth(markup: &str, max_depth: usize) -> Result<Vec<Node>, RenderError> {
    let markup = convert_html_entities(markup);
    let mut reader = Reader::from_str(&markup);
    reader.config_mut().trim_text(false);

    parse_children(&mut reader, None, 0, max_depth)
}

fn parse_children(
    reader: &mut Reader<&[u8]>,
    parent: Option<&str>,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<Node>, RenderError> {
    let mut nodes = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref())?;
                check_depth(&tag, depth, max_depth)?;
                let attrs = decode_attrs(reader, &e)?;
                let children = parse_children(reader, Some(&tag), depth + 1, max_depth)?;
                nodes.push(Node::Element(Element {
                    tag,
                    attrs,
                    children,
                }));
            }
            Event::Empty(e) => {
                let tag = decode_name(reader, e.name().as_ref())?;
                check_depth(&tag, depth, max_depth)?;
                nodes.push(Node::Element(Element {
                    tag,
                    attrs: decode_attrs(reader, &e)?,
                    children: Vec::new(),
                }));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                push_text(&mut nodes, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                push_text(&mut nodes, &decode_entity(&entity));
            }
            Event::CData(e) => {
                push_text(&mut nodes, &String::from_utf8_lossy(&e));
            }
            // The reader verifies that end tags match their start tags.
            Event::End(_) => return Ok(nodes),
            Event::Eof => {
                return match parent {
                    Some(tag) => Err(RenderError::UnclosedElement {
                        tag: tag.to_owned(),
                    }),
                    None => Ok(nodes),
                };
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn check_depth(tag: &str, depth: usize, max_depth: usize) -> Result<(), RenderError> {
    if depth >= max_depth {
        return Err(RenderError::DepthExceeded {
            max: max_depth,
            tag: tag.to_owned(),
        });
    }
    Ok(())
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> Result<String, RenderError> {
    Ok(reader.decoder().decode(name)?.into_owned())
}

fn decode_attrs(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Attributes, RenderError> {
    let mut attrs = Attributes::new();
    for attr in e.html_attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = decode_name(reader, attr.key.as_ref())?;
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.set(key, value);
    }
    Ok(attrs)
}

/// Append text, merging with a preceding text node.
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_owned()));
    }
}
