//! Accordion composite.
//!
//! The parent hands its `multiple` setting down through the context so each
//! item picks the matching click handler, and items hand `{id, open}` back up
//! so the parent can open them initially.

use std::fmt::Write;

use nd_state::{StateBuilder, StateValue, escape_html};
use serde_json::Value;

use super::push_state;
use crate::component::{Component, ComponentOutput};
use crate::context::CompositeContext;
use crate::error::RenderError;
use crate::node::Element;
use crate::renderer::RenderCx;

const SET_ACTIVE: &str =
    "setActiveAccordion(id) { this.activeAccordion = (this.activeAccordion == id) ? '' : id; }";
const TOGGLE: &str = "toggleAccordion(id) { if (this.activeAccordions.includes(id)) { this.activeAccordions = this.activeAccordions.filter(item => item !== id); } else { this.activeAccordions.push(id); } }";
const IS_ACTIVE: &str = "isAccordionActive(id) { return this.activeAccordions.includes(id); }";

/// Accordion settings visible to items.
#[derive(Debug, Default)]
pub struct AccordionContext {
    /// Whether several items may be open at once.
    pub multiple: bool,
}

impl CompositeContext for AccordionContext {
    type Item = AccordionEntry;
}

/// One item contributed to an accordion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccordionEntry {
    /// Generated item id.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Rendered body HTML.
    pub content: String,
    /// Whether the item starts open.
    pub open: bool,
    /// Click handler expression for the header button.
    pub on_click: &'static str,
    /// Expression that is true while the item is open.
    pub is_open: &'static str,
}

/// `accordion` parent component.
#[derive(Debug)]
pub struct Accordion {
    tag: String,
}

impl Accordion {
    /// Create the component with tag `{prefix}accordion`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}accordion"),
        }
    }
}

impl Component for Accordion {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let multiple = element.bool_attr("multiple", false)?;
        let (ctx, _) = cx.collect_children(AccordionContext { multiple }, element)?;
        let items = ctx.items();

        let mut open = items.iter().filter(|item| item.open).map(|item| item.id.as_str());

        let state = if multiple {
            let ids = Value::from(open.collect::<Vec<_>>());
            StateBuilder::new()
                .add_property("activeAccordions", StateValue::verbatim(ids))
                .add_method(TOGGLE)
                .add_method(IS_ACTIVE)
        } else {
            let first = open.next();
            if open.next().is_some() {
                cx.warn(format!(
                    "<{}> opens several items but allows only one; the first stays open",
                    element.tag
                ));
            }
            StateBuilder::new()
                .add_string_property("activeAccordion", first)
                .add_method(SET_ACTIVE)
        }
        .build();

        let mut out = String::new();
        out.push_str("<div");
        push_state(&mut out, &state);
        out.push('>');

        for item in items {
            let item_state = StateBuilder::new()
                .add_string_property("id", item.id.as_str())
                .build();
            out.push_str("<div");
            push_state(&mut out, &item_state);
            let _ = write!(
                out,
                r#"><button type="button" @click="{on_click}" :aria-expanded="{is_open}">{title}</button><div role="region" x-show="{is_open}" x-collapse x-cloak>{content}</div></div>"#,
                on_click = item.on_click,
                is_open = item.is_open,
                title = escape_html(&item.title),
                content = item.content,
            );
        }

        out.push_str("</div>");
        Ok(ComponentOutput::Html(out))
    }
}

/// `accordion-item` child component.
#[derive(Debug)]
pub struct AccordionItem {
    tag: String,
}

impl AccordionItem {
    /// Create the component with tag `{prefix}accordion-item`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}accordion-item"),
        }
    }
}

impl Component for AccordionItem {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let parent = cx.settings::<AccordionContext>().map(|settings| settings.multiple);
        let multiple = parent == Some(true);
        let (on_click, is_open) = if multiple {
            ("toggleAccordion(id)", "isAccordionActive(id)")
        } else {
            ("setActiveAccordion(id)", "activeAccordion == id")
        };

        let content = cx.render_children(element)?;
        // Orphans are dropped, so they must not consume an id.
        let id = if parent.is_some() {
            cx.next_id("accordion-item")
        } else {
            String::new()
        };
        let entry = AccordionEntry {
            id,
            title: element.attr_or("title", "").to_owned(),
            content,
            open: element.bool_attr("open", false)?,
            on_click,
            is_open,
        };
        cx.contribute_or_report::<AccordionContext>(element, entry)?;
        Ok(ComponentOutput::Suppressed)
    }
}
