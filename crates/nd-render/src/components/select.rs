//! Select composite with client-side search and form posting.

use std::fmt::Write;

use nd_state::{StateBuilder, StateValue, escape_html};
use serde::Serialize;
use serde_json::Value;

use super::push_state;
use crate::component::{Component, ComponentOutput};
use crate::context::CompositeContext;
use crate::error::RenderError;
use crate::node::Element;
use crate::renderer::RenderCx;

const SELECT_CLOSE: &str = "selectClose() { this.selectOpen = false; this.selectSearch = ''; }";
const FILTERED_OPTIONS: &str = "filteredOptions() { if (!this.selectSearch) return this.selectOptions; return this.selectOptions.filter(option => option.text.toLowerCase().includes(this.selectSearch.toLowerCase())); }";

const SINGLE_SELECT: &str =
    "selectOption(option) { this.selectSelected = option.value; this.selectClose(); }";
const SINGLE_IS_SELECTED: &str =
    "isSelected(option) { return this.selectSelected === option.value; }";
const SINGLE_DISPLAY: &str = "getDisplayText() { if (!this.selectSelected) return this.selectPlaceholder; const option = this.selectOptions.find(opt => opt.value === this.selectSelected); return option ? option.text : this.selectSelected; }";

const MULTI_SELECT: &str = "selectOption(option) { if (this.selectSelected.includes(option.value)) { this.selectSelected = this.selectSelected.filter(item => item !== option.value); } else { this.selectSelected.push(option.value); } }";
const MULTI_IS_SELECTED: &str =
    "isSelected(option) { return this.selectSelected.includes(option.value); }";
const MULTI_DISPLAY: &str = "getDisplayText() { if (this.selectSelected.length === 0) return this.selectPlaceholder; if (this.selectSelected.length === 1) { const option = this.selectOptions.find(opt => opt.value === this.selectSelected[0]); return option ? option.text : this.selectSelected[0]; } return this.selectSelected.length + ' selected'; }";

/// Select settings visible to options.
#[derive(Debug, Default)]
pub struct SelectContext {
    /// Whether several options may be selected.
    pub multiple: bool,
}

impl CompositeContext for SelectContext {
    type Item = SelectOption;
}

/// One option contributed to a select.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Display text.
    pub text: String,
    /// Whether the option can be picked.
    pub disabled: bool,
    /// Whether the option starts selected.
    pub selected: bool,
}

/// `select` parent component.
#[derive(Debug)]
pub struct Select {
    tag: String,
}

impl Select {
    /// Create the component with tag `{prefix}select`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}select"),
        }
    }
}

impl Component for Select {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let multiple = element.bool_attr("multiple", false)?;
        let searchable = element.bool_attr("searchable", true)?;
        let name = element.attr_non_empty("name");
        let placeholder = element
            .attr("placeholder")
            .unwrap_or(cx.options().defaults.select_placeholder.as_str())
            .to_owned();

        let (ctx, _) = cx.collect_children(SelectContext { multiple }, element)?;
        let options = ctx.items();
        let id = match element.attr_non_empty("id") {
            Some(id) => id.to_owned(),
            None => cx.next_id("select"),
        };

        let mut preselected = options.iter().filter(|o| o.selected);
        let (selected, display) = if multiple {
            let values: Vec<&str> = preselected.map(|o| o.value.as_str()).collect();
            let display = match values.as_slice() {
                [] => placeholder.clone(),
                [one] => text_for(options, one).to_owned(),
                many => format!("{} selected", many.len()),
            };
            (StateValue::verbatim(Value::from(values)), display)
        } else {
            match preselected.next() {
                Some(option) => (StateValue::from(option.value.as_str()), option.text.clone()),
                None => (StateValue::from(""), placeholder.clone()),
            }
        };

        let builder = StateBuilder::new()
            .add_boolean_property("selectOpen", false)
            .add_string_property("selectSearch", "")
            .add_property("selectSelected", selected)
            .add_string_property("selectPlaceholder", placeholder.as_str())
            .add_serialized_property("selectOptions", options)?
            .add_toggle_method("selectOpen")
            .add_method(SELECT_CLOSE);
        let state = if multiple {
            builder
                .add_method(MULTI_SELECT)
                .add_method(MULTI_IS_SELECTED)
                .add_method(MULTI_DISPLAY)
        } else {
            builder
                .add_method(SINGLE_SELECT)
                .add_method(SINGLE_IS_SELECTED)
                .add_method(SINGLE_DISPLAY)
        }
        .add_method(FILTERED_OPTIONS)
        .build();

        let mut out = String::new();
        out.push_str("<div");
        push_state(&mut out, &state);
        let _ = write!(
            out,
            r#" id="{id}" @click.outside="selectClose()"><button type="button" id="{id}-button" aria-haspopup="listbox" :aria-expanded="selectOpen" @click="selectOpenToggle()"><span x-text="getDisplayText()">{display}</span></button>"#,
            id = escape_html(&id),
            display = escape_html(&display),
        );

        out.push_str(r#"<div x-show="selectOpen" x-cloak>"#);
        if searchable {
            out.push_str(r#"<input type="text" x-model="selectSearch" placeholder="Search..." aria-label="Search options" />"#);
        }
        let _ = write!(
            out,
            r#"<ul role="listbox" aria-labelledby="{}-button"{}>"#,
            escape_html(&id),
            if multiple { r#" aria-multiselectable="true""# } else { "" }
        );
        out.push_str(concat!(
            r#"<template x-for="option in filteredOptions()" :key="option.value">"#,
            r#"<li role="option" :aria-selected="isSelected(option)" :aria-disabled="option.disabled" @click="option.disabled || selectOption(option)" x-text="option.text"></li>"#,
            "</template></ul>",
            r#"<p x-show="filteredOptions().length === 0">No results found</p>"#,
            "</div>",
        ));

        if let Some(name) = name {
            let name = escape_html(name);
            if multiple {
                let _ = write!(
                    out,
                    r#"<template x-for="value in selectSelected" :key="value"><input type="hidden" name="{name}[]" :value="value" /></template>"#
                );
            } else {
                let _ = write!(
                    out,
                    r#"<input type="hidden" name="{name}" :value="selectSelected" />"#
                );
            }
        }

        out.push_str("</div>");

        tracing::debug!(id = %id, options = options.len(), multiple, "Rendered select");
        Ok(ComponentOutput::Html(out))
    }
}

/// Display text of the option with `value`, or the value itself.
fn text_for<'a>(options: &'a [SelectOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map_or(value, |o| o.text.as_str())
}

/// `option` child component.
///
/// The display text is the element's text content, then the `text`
/// attribute, then the value.
#[derive(Debug)]
pub struct OptionItem {
    tag: String,
}

impl OptionItem {
    /// Create the component with tag `{prefix}option`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}option"),
        }
    }
}

impl Component for OptionItem {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let value = element.attr_or("value", "").to_owned();
        let content = element.text_content();
        let text = match content.trim() {
            "" => element.attr_non_empty("text").unwrap_or(value.as_str()).to_owned(),
            text => text.to_owned(),
        };

        let option = SelectOption {
            text,
            value,
            disabled: element.bool_attr("disabled", false)?,
            selected: element.bool_attr("selected", false)?,
        };
        cx.contribute_or_report::<SelectContext>(element, option)?;
        Ok(ComponentOutput::Suppressed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::components::test_support::{render, render_with, x_data};
    use crate::renderer::{ComponentDefaults, RenderOptions};

    const FRUITS: &str = r#"<nd-select name="fruit">
        <nd-option value="apple">Apple</nd-option>
        <nd-option value="pear" selected>Pear</nd-option>
        <nd-option value="fig" text="Fig" disabled />
    </nd-select>"#;

    #[test]
    fn test_options_serialized_in_order() {
        let state = x_data(&render(FRUITS), 0);
        let apple = state.find(r#""text":"Apple""#).unwrap();
        let pear = state.find(r#""text":"Pear""#).unwrap();
        let fig = state.find(r#""text":"Fig""#).unwrap();
        assert!(apple < pear && pear < fig);
        assert!(state.contains(r#""value":"fig""#));
        assert_eq!(state.matches(r#""disabled":true"#).count(), 1);
        assert_eq!(state.matches(r#""selected":true"#).count(), 1);
    }

    #[test]
    fn test_single_selection_prepopulated() {
        let html = render(FRUITS);
        let state = x_data(&html, 0);
        assert!(state.starts_with(
            "{ selectOpen: false, selectSearch: '', selectSelected: 'pear', selectPlaceholder: 'Select option', "
        ));
        assert!(state.contains("selectOpenToggle() { this.selectOpen = !this.selectOpen; }"));
        assert!(html.contains(r#"<span x-text="getDisplayText()">Pear</span>"#));
        assert!(html.contains(r#"<input type="hidden" name="fruit" :value="selectSelected" />"#));
        assert!(html.contains(r#"<input type="text" x-model="selectSearch""#));
    }

    #[test]
    fn test_multiple_selection() {
        let html = render(
            r#"<nd-select name="tags" multiple searchable="false"><nd-option value="a" selected>A</nd-option><nd-option value="b" selected>B</nd-option></nd-select>"#,
        );
        let state = x_data(&html, 0);
        assert!(state.contains(r#"selectSelected: ["a","b"]"#));
        assert!(state.contains("this.selectSelected.push(option.value)"));
        assert!(html.contains(r#"aria-multiselectable="true""#));
        assert!(html.contains(r#"name="tags[]""#));
        assert!(html.contains(">2 selected</span>"));
        assert!(!html.contains(r#"x-model="selectSearch""#));
    }

    #[test]
    fn test_placeholder_default_and_override() {
        let options = RenderOptions::default().with_defaults(ComponentDefaults {
            select_placeholder: "Pick one".to_owned(),
            ..ComponentDefaults::default()
        });
        let result = render_with(options, r#"<nd-select><nd-option value="x" /></nd-select>"#);
        assert!(result.html.contains(">Pick one</span>"));

        let html = render(r#"<nd-select placeholder="It's empty"><nd-option value="x" /></nd-select>"#);
        assert!(x_data(&html, 0).contains(r"selectPlaceholder: 'It\'s empty'"));
    }

    #[test]
    fn test_generated_and_explicit_ids() {
        let html = render(r#"<nd-select /><nd-select id="country" />"#);
        assert!(html.contains(r#" id="select-0" "#));
        assert!(html.contains(r#" id="country" "#));
        assert_eq!(html.matches("<input type=\"hidden\"").count(), 0);
    }

    #[test]
    fn test_option_text_falls_back_to_value() {
        let state = x_data(&render(r#"<nd-select><nd-option value="raw" /></nd-select>"#), 0);
        assert!(state.contains(r#""text":"raw""#));
    }
}
