//! Data table composite.
//!
//! Columns and static rows are declared as children; each row opens its own
//! nested [`RowContext`] that collects cells. Rows may also come from a
//! caller-supplied collection named by the `bind` attribute:
//!
//! ```text
//! <nd-data-table title="Users" bind="users" per-page="25">
//!   <nd-data-table-column key="name" label="Name" sortable />
//!   <nd-data-table-column key="address.city" label="City" />
//!   <nd-data-table-row>
//!     <nd-data-table-cell key="name">Static row</nd-data-table-cell>
//!   </nd-data-table-row>
//! </nd-data-table>
//! ```
//!
//! Sorting, searching, and pagination run on the client. With `api-url` the
//! client fetches rows from the endpoint instead.

use std::fmt::Write;

use nd_state::{StateBuilder, StateValue, escape_html};
use serde::Serialize;
use serde_json::Value;

use super::push_state;
use crate::bindings::{Row, insert_path};
use crate::component::{Component, ComponentOutput};
use crate::context::CompositeContext;
use crate::error::RenderError;
use crate::node::Element;
use crate::renderer::RenderCx;

const TOTAL_PAGES: &str = "get totalPages() { return Math.max(1, Math.ceil((this.serverPagination ? this.totalRecords : this.filteredData.length) / this.perPage)); }";
const PAGE_NUMBERS: &str = "get pageNumbers() { const pages = []; const total = this.totalPages; if (total <= 5) { for (let i = 1; i <= total; i++) pages.push(i); return pages; } let start = Math.max(2, this.currentPage - 1); let end = Math.min(total - 1, this.currentPage + 1); if (this.currentPage <= 2) end = 4; else if (this.currentPage >= total - 1) start = total - 3; pages.push(1); if (start > 2) pages.push('...'); for (let i = start; i <= end; i++) pages.push(i); if (end < total - 1) pages.push('...'); pages.push(total); return pages; }";
const PAGINATED_DATA: &str = "get paginatedData() { if (this.serverPagination) return this.data; const start = (this.currentPage - 1) * this.perPage; return this.filteredData.slice(start, start + this.perPage); }";
const FETCH_DATA: &str = "async fetchData() { this.loading = true; this.error = null; try { const url = new URL(this.apiUrl, window.location.origin); url.searchParams.set('_page', String(this.currentPage)); url.searchParams.set('_limit', String(this.perPage)); if (this.sortColumn) { url.searchParams.set('_sort', this.sortColumn); url.searchParams.set('_order', this.sortDirection); } if (this.searchTerm.trim() !== '') url.searchParams.set('q', this.searchTerm.trim()); const response = await fetch(url.toString()); if (!response.ok) throw new Error(`HTTP error ${response.status}`); const total = response.headers.get('X-Total-Count'); if (total) { this.totalRecords = parseInt(total, 10); this.serverPagination = true; } const data = await response.json(); this.data = Array.isArray(data) ? data : []; if (this.serverPagination) this.filteredData = this.data; else this.applyFiltersAndSort(); } catch (error) { this.error = error.message; this.data = []; this.filteredData = []; } finally { this.loading = false; } }";
const HANDLE_SEARCH: &str = "handleSearch() { this.currentPage = 1; if (this.serverPagination) this.fetchData(); else this.applyFiltersAndSort(); }";
const SORT: &str = "sort(column) { if (this.sortColumn === column) { this.sortDirection = this.sortDirection === 'asc' ? 'desc' : 'asc'; } else { this.sortColumn = column; this.sortDirection = 'asc'; } if (this.serverPagination) this.fetchData(); else this.applyFiltersAndSort(); }";
const APPLY_FILTERS_AND_SORT: &str = "applyFiltersAndSort() { let rows = this.data; const term = this.searchTerm.trim().toLowerCase(); if (term !== '') { rows = rows.filter(item => this.columns.some(column => { const value = this.getNestedValue(item, column.key); return value !== null && String(value).toLowerCase().includes(term); })); } if (this.sortColumn) { const dir = this.sortDirection === 'asc' ? 1 : -1; rows = [...rows].sort((a, b) => { const x = this.getNestedValue(a, this.sortColumn); const y = this.getNestedValue(b, this.sortColumn); if (typeof x === 'string' && typeof y === 'string') return dir * x.localeCompare(y); return dir * ((x ?? 0) - (y ?? 0)); }); } this.filteredData = rows; if (this.currentPage > this.totalPages) this.currentPage = this.totalPages; }";
const INIT_STATIC_DATA: &str = "initStaticData() { this.filteredData = [...this.data]; this.applyFiltersAndSort(); this.loading = false; }";
const GO_TO_PAGE: &str = "goToPage(page) { if (page === '...' || page < 1 || page > this.totalPages) return; this.currentPage = page; if (this.serverPagination) this.fetchData(); }";
const GET_NESTED_VALUE: &str = "getNestedValue(obj, path) { return path.split('.').reduce((prev, curr) => (prev && prev[curr] !== undefined ? prev[curr] : null), obj); }";
const FORMAT_HREF: &str = "formatHref(template, item) { return template.replace(/{([^}]+)}/g, (match, key) => this.getNestedValue(item, key) ?? ''); }";

/// Context collecting columns and static rows.
#[derive(Debug, Default)]
pub struct DataTableContext;

impl CompositeContext for DataTableContext {
    type Item = TablePart;
}

/// Something a data table child contributes.
#[derive(Clone, Debug, PartialEq)]
pub enum TablePart {
    /// Column definition.
    Column(TableColumn),
    /// Static row.
    Row(Row),
}

/// Column definition, sent to the client as part of the table state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    /// Field path read from each row (`name`, `address.city`).
    pub key: String,
    /// Header label.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Link template with `{field}` placeholders.
    pub href: Option<String>,
    /// Link text template with `{field}` placeholders.
    pub href_text: Option<String>,
    /// Column width hint.
    pub width: Option<String>,
    /// Text alignment: `left`, `center`, or `right`.
    pub align: String,
    /// Whether the column starts hidden.
    pub hidden: bool,
}

/// Context of one static row, collecting its cells.
#[derive(Debug, Default)]
pub struct RowContext;

impl CompositeContext for RowContext {
    type Item = (String, String);
}

/// `data-table` parent component.
#[derive(Debug)]
pub struct DataTable {
    tag: String,
}

impl DataTable {
    /// Create the component with tag `{prefix}data-table`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}data-table"),
        }
    }
}

impl Component for DataTable {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let per_page = element.parsed_attr("per-page", cx.options().defaults.data_table_per_page)?;
        if per_page == 0 {
            return Err(RenderError::InvalidAttribute {
                tag: element.tag.clone(),
                name: "per-page".to_owned(),
                value: "0".to_owned(),
                expected: "a positive number".to_owned(),
            });
        }
        let api_url = element.attr_non_empty("api-url");
        let server_pagination = element.bool_attr("server-pagination", false)?;
        let show_search = element.bool_attr("show-search", true)?;
        let show_pagination = element.bool_attr("show-pagination", true)?;

        let (ctx, _) = cx.collect_children(DataTableContext, element)?;

        let mut columns = Vec::new();
        let mut rows = Vec::new();
        for part in ctx.into_parts().1 {
            match part {
                TablePart::Column(column) => columns.push(column),
                TablePart::Row(row) => rows.push(Value::Object(row)),
            }
        }

        let bound = element.attr_non_empty("bind");
        if let Some(name) = bound {
            let bound_rows = cx
                .bindings()
                .get(name)
                .ok_or_else(|| RenderError::UnknownBinding {
                    tag: element.tag.clone(),
                    name: name.to_owned(),
                })?;
            rows.extend(bound_rows.iter().cloned().map(Value::Object));
        }

        let id = cx.next_id("data-table");
        let row_count = rows.len();
        let init = if api_url.is_some() {
            Some("fetchData()")
        } else if row_count > 0 || bound.is_some() {
            Some("initStaticData()")
        } else {
            None
        };

        let state = StateBuilder::new()
            .add_string_property("apiUrl", api_url)
            .add_serialized_property("columns", &columns)?
            .add_property("perPage", per_page)
            .add_property("data", StateValue::verbatim(Value::Array(rows)))
            .add_raw_property("filteredData", "[]")
            .add_boolean_property("loading", api_url.is_some() && row_count == 0)
            .add_property("error", StateValue::Null)
            .add_property("currentPage", 1)
            .add_string_property("searchTerm", "")
            .add_property("sortColumn", StateValue::Null)
            .add_string_property("sortDirection", "asc")
            .add_property("totalRecords", 0)
            .add_boolean_property("serverPagination", server_pagination)
            .add_method(TOTAL_PAGES)
            .add_method(PAGE_NUMBERS)
            .add_method(PAGINATED_DATA)
            .add_method(FETCH_DATA)
            .add_method(HANDLE_SEARCH)
            .add_method(SORT)
            .add_method(APPLY_FILTERS_AND_SORT)
            .add_method(INIT_STATIC_DATA)
            .add_method(GO_TO_PAGE)
            .add_method(GET_NESTED_VALUE)
            .add_method(FORMAT_HREF)
            .build();

        let mut out = String::with_capacity(state.len() + 2048);
        out.push_str("<div");
        push_state(&mut out, &state);
        if let Some(init) = init {
            let _ = write!(out, r#" x-init="{init}""#);
        }
        let _ = write!(out, r#" id="{}">"#, escape_html(&id));

        if let Some(title) = element.attr_non_empty("title") {
            let _ = write!(out, "<h2>{}</h2>", escape_html(title));
        }
        if show_search {
            let placeholder = element.attr_or("search-placeholder", "Search...");
            let _ = write!(
                out,
                r#"<input type="search" x-model="searchTerm" @input="handleSearch()" placeholder="{}" aria-label="Search" />"#,
                escape_html(placeholder)
            );
        }

        out.push_str(concat!(
            "<table><thead><tr>",
            r#"<template x-for="column in columns" :key="column.key">"#,
            r#"<th scope="col" x-show="!column.hidden" @click="column.sortable &amp;&amp; sort(column.key)" :aria-sort="sortColumn === column.key ? (sortDirection === 'asc' ? 'ascending' : 'descending') : 'none'" x-text="column.label"></th>"#,
            "</template></tr></thead><tbody>",
            r#"<template x-if="loading"><tr><td :colspan="columns.length">Loading...</td></tr></template>"#,
            r#"<template x-if="!loading &amp;&amp; error"><tr><td :colspan="columns.length" x-text="error"></td></tr></template>"#,
        ));
        let _ = write!(
            out,
            r#"<template x-if="!loading &amp;&amp; !error &amp;&amp; filteredData.length === 0"><tr><td :colspan="columns.length">{}</td></tr></template>"#,
            escape_html(element.attr_or("no-results", "No results found"))
        );
        out.push_str(concat!(
            r#"<template x-for="(item, index) in paginatedData" :key="index"><tr>"#,
            r#"<template x-for="column in columns" :key="column.key"><td x-show="!column.hidden">"#,
            r#"<template x-if="column.href"><a :href="formatHref(column.href, item)" x-text="column.hrefText ? formatHref(column.hrefText, item) : getNestedValue(item, column.key)"></a></template>"#,
            r#"<template x-if="!column.href"><span x-text="getNestedValue(item, column.key)"></span></template>"#,
            "</td></template></tr></template>",
            "</tbody></table>",
        ));

        if show_pagination {
            out.push_str(concat!(
                r#"<nav aria-label="pagination" x-show="totalPages &gt; 1">"#,
                r#"<button type="button" @click="goToPage(currentPage - 1)" :disabled="currentPage === 1">Previous</button>"#,
                r#"<template x-for="(page, index) in pageNumbers" :key="index"><button type="button" @click="goToPage(page)" :disabled="page === '...'" :aria-current="page === currentPage ? 'page' : null" x-text="page"></button></template>"#,
                r#"<button type="button" @click="goToPage(currentPage + 1)" :disabled="currentPage === totalPages">Next</button>"#,
                "</nav>",
            ));
        }

        out.push_str("</div>");

        tracing::debug!(
            id = %id,
            columns = columns.len(),
            rows = row_count,
            "Rendered data table"
        );
        Ok(ComponentOutput::Html(out))
    }
}

/// `data-table-column` child component.
#[derive(Debug)]
pub struct DataTableColumn {
    tag: String,
}

impl DataTableColumn {
    /// Create the component with tag `{prefix}data-table-column`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}data-table-column"),
        }
    }
}

impl Component for DataTableColumn {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let key = element.attr_or("key", "").to_owned();
        let align = element.attr_or("align", "left").to_ascii_lowercase();
        if !matches!(align.as_str(), "left" | "center" | "right") {
            return Err(RenderError::InvalidAttribute {
                tag: element.tag.clone(),
                name: "align".to_owned(),
                value: align,
                expected: "left, center, or right".to_owned(),
            });
        }

        let column = TableColumn {
            label: element.attr_non_empty("label").unwrap_or(key.as_str()).to_owned(),
            key,
            sortable: element.bool_attr("sortable", false)?,
            href: element.attr_non_empty("href").map(str::to_owned),
            href_text: element.attr_non_empty("href-text").map(str::to_owned),
            width: element.attr_non_empty("width").map(str::to_owned),
            align,
            hidden: element.bool_attr("hidden", false)?,
        };
        cx.contribute_or_report::<DataTableContext>(element, TablePart::Column(column))?;
        Ok(ComponentOutput::Suppressed)
    }
}

/// `data-table-row` child component.
#[derive(Debug)]
pub struct DataTableRow {
    tag: String,
}

impl DataTableRow {
    /// Create the component with tag `{prefix}data-table-row`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}data-table-row"),
        }
    }
}

impl Component for DataTableRow {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let (ctx, _) = cx.collect_children(RowContext, element)?;

        let mut row = Row::new();
        for (key, text) in ctx.into_parts().1 {
            insert_path(&mut row, &key, Value::String(text));
        }
        cx.contribute_or_report::<DataTableContext>(element, TablePart::Row(row))?;
        Ok(ComponentOutput::Suppressed)
    }
}

/// `data-table-cell` child component.
///
/// Cells without a `key` are dropped.
#[derive(Debug)]
pub struct DataTableCell {
    tag: String,
}

impl DataTableCell {
    /// Create the component with tag `{prefix}data-table-cell`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tag: format!("{prefix}data-table-cell"),
        }
    }
}

impl Component for DataTableCell {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError> {
        let Some(key) = element.attr_non_empty("key") else {
            tracing::debug!(tag = %element.tag, "Dropped cell without key");
            return Ok(ComponentOutput::Suppressed);
        };
        let text = element.text_content().trim().to_owned();
        cx.contribute_or_report::<RowContext>(element, (key.to_owned(), text))?;
        Ok(ComponentOutput::Suppressed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::bindings::{Bindings, FieldMap};
    use crate::components::test_support::{render, render_bound, x_data};
    use crate::error::RenderError;
    use crate::renderer::{RenderOptions, Renderer};

    struct User {
        name: &'static str,
        age: u32,
        city: &'static str,
    }

    fn user_fields() -> FieldMap<User> {
        FieldMap::new()
            .field("name", |u: &User| u.name)
            .field("age", |u: &User| u.age)
            .field("address.city", |u: &User| u.city)
    }

    const TABLE: &str = r#"<nd-data-table title="Users" bind="users" per-page="5">
        <nd-data-table-column key="name" label="Name" sortable />
        <nd-data-table-column key="address.city" label="City" href="/cities/{address.city}" />
        <nd-data-table-row>
            <nd-data-table-cell key="name"> Static </nd-data-table-cell>
            <nd-data-table-cell key="address.city">Rome</nd-data-table-cell>
        </nd-data-table-row>
    </nd-data-table>"#;

    #[test]
    fn test_static_rows_then_bound_rows() {
        let users = [
            User { name: "Ada", age: 36, city: "London" },
            User { name: "Linus", age: 21, city: "Helsinki" },
        ];
        let bindings = Bindings::new().with_collection("users", &user_fields(), &users);
        let html = render_bound(TABLE, &bindings);
        let state = x_data(&html, 0);

        assert!(state.contains(concat!(
            r#"data: [{"address":{"city":"Rome"},"name":"Static"},"#,
            r#"{"address":{"city":"London"},"age":36,"name":"Ada"},"#,
            r#"{"address":{"city":"Helsinki"},"age":21,"name":"Linus"}]"#,
        )));
        assert!(state.contains("perPage: 5,"));
        assert!(state.contains("loading: false,"));
        assert!(html.contains(r#" x-init="initStaticData()""#));
        assert!(html.contains("<h2>Users</h2>"));
    }

    #[test]
    fn test_columns_serialized_with_camel_case_keys() {
        let bindings = Bindings::new().with_rows("users", Vec::new());
        let state = x_data(&render_bound(TABLE, &bindings), 0);

        let name = state.find(r#""key":"name""#).unwrap();
        let city = state.find(r#""key":"address.city""#).unwrap();
        assert!(name < city);
        assert!(state.contains(r#""hrefText":null"#));
        assert!(state.contains(r#""href":"/cities/{address.city}""#));
        assert!(state.contains(r#""sortable":true"#));
    }

    #[test]
    fn test_unknown_binding_is_error() {
        let err = Renderer::new(RenderOptions::default())
            .with_builtins()
            .render_markup(TABLE)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownBinding { ref name, .. } if name == "users"
        ));
    }

    #[test]
    fn test_api_url_fetches() {
        let html = render(
            r#"<nd-data-table api-url="/api/users?x=1&amp;y=2"><nd-data-table-column key="id" /></nd-data-table>"#,
        );
        let state = x_data(&html, 0);
        assert!(state.starts_with("{ apiUrl: '/api/users?x=1&y=2', "));
        assert!(state.contains("loading: true,"));
        assert!(html.contains(r#" x-init="fetchData()""#));
        assert!(state.contains(r#""label":"id""#));
    }

    #[test]
    fn test_empty_table_has_no_init() {
        let html = render(r#"<nd-data-table show-search="false" show-pagination="false" />"#);
        assert!(!html.contains("x-init"));
        assert!(!html.contains(r#"type="search""#));
        assert!(!html.contains(r#"aria-label="pagination""#));
        assert!(x_data(&html, 0).contains("perPage: 10,"));
    }

    #[test]
    fn test_zero_per_page_is_error() {
        let err = Renderer::new(RenderOptions::default())
            .with_builtins()
            .render_markup(r#"<nd-data-table per-page="0" />"#)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidAttribute { ref name, .. } if name == "per-page"));
    }

    #[test]
    fn test_nested_row_context_isolated_from_table() {
        let html = render(
            r#"<nd-data-table><nd-data-table-row><nd-data-table-cell key="a">1</nd-data-table-cell></nd-data-table-row><nd-data-table-row><nd-data-table-cell key="a">2</nd-data-table-cell><nd-data-table-cell>dropped</nd-data-table-cell></nd-data-table-row></nd-data-table>"#,
        );
        let state = x_data(&html, 0);
        assert!(state.contains(r#"data: [{"a":"1"},{"a":"2"}]"#));
        assert_eq!(state.matches("dropped").count(), 0);
    }

    #[test]
    fn test_invalid_align_is_error() {
        let err = Renderer::new(RenderOptions::default())
            .with_builtins()
            .render_markup(r#"<nd-data-table><nd-data-table-column key="a" align="middle" /></nd-data-table>"#)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidAttribute { ref name, .. } if name == "align"));
    }
}
