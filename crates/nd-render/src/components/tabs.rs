//! Tabs composite.
//!
//! ```text
//! <nd-tabs>
//!   <nd-tab-item title="macOS">Install with Homebrew.</nd-tab-item>
//!   <nd-tab-item title="Linux" active>Install with apt.</nd-tab-item>
//! </nd-tabs>
//! ```

use std::fmt::Write;

use nd_state::{StateBuilder, escape_html};

use super::push_state;
use crate::component::{Component, ComponentOutput};
use crate::context::CompositeContext;
use crate::error::RenderError;
use crate::node::Element;
use crate::renderer::RenderCx;

const TAB_BUTTON_CLICKED: &str = "tabButtonClicked(tabButton) { this.tabSelected = Number(tabButton.id.replace(this.tabId + '-', '')); }";
const TAB_CONTENT_ACTIVE: &str = "tabContentActive(tabContent) { return this.tabSelected == tabContent.id.replace(this.tabId + '-content-', ''); }";

/// Context collecting [`TabEntry`] items.
#[derive(Debug, Default)]
pub struct TabsContext;

impl CompositeContext for TabsContext {
    type Item = TabEntry;
}

/// One tab contributed by a tab item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabEntry {
    /// Button label (plain text).
    pub title: String,
    /// Rendered panel HTML.
    pub content: String,
    /// Whether the tab is selected initially.
    pub active: bool,
}

/// `tabs` parent component.
#[derive(Debug)]
pub struct Tabs {
    tag: String,
}

impl Tabs {
    /// Create the component with tag `{prefix}tabs`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}tabs"),
        }
    }
}

impl Component for Tabs {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let (ctx, _) = cx.collect_children(TabsContext, element)?;
        let tabs = ctx.items();
        let tab_id = cx.next_id("tabs");

        let selected = tabs.iter().position(|tab| tab.active).map_or(1, |i| i + 1);

        let state = StateBuilder::new()
            .add_property("tabSelected", selected)
            .add_string_property("tabId", tab_id.as_str())
            .add_method(TAB_BUTTON_CLICKED)
            .add_method(TAB_CONTENT_ACTIVE)
            .build();

        let mut out = String::with_capacity(256 + tabs.iter().map(|t| t.content.len()).sum::<usize>());
        out.push_str("<div");
        push_state(&mut out, &state);
        let _ = write!(out, r#" id="{}">"#, escape_html(&tab_id));

        out.push_str(r#"<div role="tablist">"#);
        for (idx, tab) in tabs.iter().enumerate() {
            let n = idx + 1;
            let _ = write!(
                out,
                r#"<button type="button" role="tab" id="{id}-{n}" aria-controls="{id}-content-{n}" :aria-selected="tabSelected == {n}" @click="tabButtonClicked($el)">{title}</button>"#,
                id = escape_html(&tab_id),
                title = escape_html(&tab.title),
            );
        }
        out.push_str("</div>");

        for (idx, tab) in tabs.iter().enumerate() {
            let n = idx + 1;
            let cloak = if n == selected { "" } else { " x-cloak" };
            let _ = write!(
                out,
                r#"<div role="tabpanel" id="{id}-content-{n}" aria-labelledby="{id}-{n}" x-show="tabContentActive($el)"{cloak}>{content}</div>"#,
                id = escape_html(&tab_id),
                content = tab.content,
            );
        }

        out.push_str("</div>");

        tracing::debug!(id = %tab_id, tabs = tabs.len(), selected, "Rendered tabs");
        Ok(ComponentOutput::Html(out))
    }
}

/// `tab-item` child component.
#[derive(Debug)]
pub struct TabItem {
    tag: String,
}

impl TabItem {
    /// Create the component with tag `{prefix}tab-item`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}tab-item"),
        }
    }
}

impl Component for TabItem {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let content = cx.render_children(element)?;
        let entry = TabEntry {
            title: element.attr_or("title", "").to_owned(),
            content,
            active: element.bool_attr("active", false)?,
        };
        cx.contribute_or_report::<TabsContext>(element, entry)?;
        Ok(ComponentOutput::Suppressed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::components::test_support::{render, x_data};

    #[test]
    fn test_tabs_render_buttons_and_panels_in_order() {
        let html = render(
            r#"<nd-tabs><nd-tab-item title="macOS">Brew</nd-tab-item><nd-tab-item title="Linux">Apt</nd-tab-item></nd-tabs>"#,
        );

        let macos = html.find(">macOS</button>").unwrap();
        let linux = html.find(">Linux</button>").unwrap();
        assert!(macos < linux);
        assert!(html.contains(r#"id="tabs-0-content-1" aria-labelledby="tabs-0-1" x-show="tabContentActive($el)">Brew</div>"#));
        assert!(html.contains(r#"id="tabs-0-content-2" aria-labelledby="tabs-0-2" x-show="tabContentActive($el)" x-cloak>Apt</div>"#));
        assert!(!html.contains("nd-tab-item"));
    }

    #[test]
    fn test_tabs_state() {
        let html = render(
            r#"<nd-tabs><nd-tab-item title="A">a</nd-tab-item><nd-tab-item title="B" active>b</nd-tab-item></nd-tabs>"#,
        );
        let state = x_data(&html, 0);
        assert!(state.starts_with("{ tabSelected: 2, tabId: 'tabs-0', tabButtonClicked(tabButton)"));
        assert!(state.ends_with("} }"));
    }

    #[test]
    fn test_tabs_default_selection() {
        let html = render(r#"<nd-tabs><nd-tab-item title="A">a</nd-tab-item></nd-tabs>"#);
        assert!(x_data(&html, 0).starts_with("{ tabSelected: 1,"));
    }

    #[test]
    fn test_tab_title_is_escaped() {
        let html = render(r#"<nd-tabs><nd-tab-item title="&lt;b&gt; &amp; 'q'">x</nd-tab-item></nd-tabs>"#);
        assert!(html.contains(">&lt;b&gt; &amp; &#x27;q&#x27;</button>"));
    }

    #[test]
    fn test_nested_tabs_are_isolated() {
        let html = render(
            r#"<nd-tabs><nd-tab-item title="Outer"><nd-tabs><nd-tab-item title="Inner 1">1</nd-tab-item><nd-tab-item title="Inner 2">2</nd-tab-item></nd-tabs></nd-tab-item></nd-tabs>"#,
        );

        // Inner tabs close first and get the first id.
        assert_eq!(html.matches(r#"role="tab" "#).count(), 3);
        assert!(x_data(&html, 0).contains("tabId: 'tabs-1'"));
        assert!(x_data(&html, 1).contains("tabId: 'tabs-0'"));
    }
}
