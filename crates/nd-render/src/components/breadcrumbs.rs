//! Breadcrumbs composite.

use std::fmt::Write;

use nd_state::escape_html;

use crate::component::{Component, ComponentOutput};
use crate::context::CompositeContext;
use crate::error::RenderError;
use crate::node::Element;
use crate::renderer::RenderCx;

/// Context collecting [`BreadcrumbEntry`] items.
#[derive(Debug, Default)]
pub struct BreadcrumbsContext;

impl CompositeContext for BreadcrumbsContext {
    type Item = BreadcrumbEntry;
}

/// One breadcrumb.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbEntry {
    /// Label HTML (rendered child content, or the escaped `text` attribute).
    pub label: String,
    /// Link target; `None` renders plain text.
    pub href: Option<String>,
    /// Whether this is the current page.
    pub current: bool,
}

/// `breadcrumbs` parent component.
#[derive(Debug)]
pub struct Breadcrumbs {
    tag: String,
}

impl Breadcrumbs {
    /// Create the component with tag `{prefix}breadcrumbs`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}breadcrumbs"),
        }
    }
}

impl Component for Breadcrumbs {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let separator = element
            .attr("separator")
            .unwrap_or(cx.options().defaults.breadcrumb_separator.as_str())
            .to_owned();
        let show_home = element.bool_attr("show-home", true)?;
        let home_url = element.attr_or("home-url", "/").to_owned();

        let (ctx, _) = cx.collect_children(BreadcrumbsContext, element)?;

        let mut crumbs = Vec::with_capacity(ctx.len() + 1);
        if show_home {
            crumbs.push(format!(r#"<a href="{}">Home</a>"#, escape_html(&home_url)));
        }
        for entry in ctx.items() {
            crumbs.push(match (&entry.href, entry.current) {
                (Some(href), false) => {
                    format!(r#"<a href="{}">{}</a>"#, escape_html(href), entry.label)
                }
                (_, true) => format!(r#"<span aria-current="page">{}</span>"#, entry.label),
                (None, false) => format!("<span>{}</span>", entry.label),
            });
        }

        let mut out = String::from(r#"<nav aria-label="breadcrumb"><ol>"#);
        for (idx, crumb) in crumbs.iter().enumerate() {
            if idx > 0 {
                let _ = write!(
                    out,
                    r#"<li aria-hidden="true">{}</li>"#,
                    escape_html(&separator)
                );
            }
            let _ = write!(out, "<li>{crumb}</li>");
        }
        out.push_str("</ol></nav>");

        Ok(ComponentOutput::Html(out))
    }
}

/// `breadcrumb-item` child component.
///
/// Non-blank child content takes precedence over the `text` attribute.
#[derive(Debug)]
pub struct BreadcrumbItem {
    tag: String,
}

impl BreadcrumbItem {
    /// Create the component with tag `{prefix}breadcrumb-item`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}breadcrumb-item"),
        }
    }
}

impl Component for BreadcrumbItem {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let content = cx.render_children(element)?;
        let label = if content.trim().is_empty() {
            escape_html(element.attr_or("text", ""))
        } else {
            content.trim().to_owned()
        };
        let current = element.bool_attr("current", false)?;
        let entry = BreadcrumbEntry {
            label,
            href: element.attr_non_empty("href").map(str::to_owned),
            current,
        };
        cx.contribute_or_report::<BreadcrumbsContext>(element, entry)?;
        Ok(ComponentOutput::Suppressed)
    }
}
