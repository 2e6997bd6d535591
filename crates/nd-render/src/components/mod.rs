//! Built-in composite components.
//!
//! Every composite follows the same protocol: the parent registers a context,
//! renders its children (which contribute items and write nothing), then
//! builds its client state and markup from the collected items.
//!
//! | Parent            | Children                                                   |
//! |-------------------|------------------------------------------------------------|
//! | `tabs`            | `tab-item`                                                 |
//! | `accordion`       | `accordion-item`                                           |
//! | `breadcrumbs`     | `breadcrumb-item`                                          |
//! | `select`          | `option`                                                   |
//! | `data-table`      | `data-table-column`, `data-table-row` → `data-table-cell`  |
//!
//! Tags are registered under a configurable prefix (`nd-` by default).

mod accordion;
mod breadcrumbs;
mod data_table;
mod select;
mod tabs;

pub use accordion::{Accordion, AccordionContext, AccordionEntry, AccordionItem};
pub use breadcrumbs::{BreadcrumbEntry, BreadcrumbItem, Breadcrumbs, BreadcrumbsContext};
pub use data_table::{
    DataTable, DataTableCell, DataTableColumn, DataTableContext, DataTableRow, RowContext,
    TableColumn, TablePart,
};
pub use select::{OptionItem, Select, SelectContext, SelectOption};
pub use tabs::{TabEntry, TabItem, Tabs, TabsContext};

use crate::component::Component;
use crate::html::push_attr;

/// Instantiate every built-in component with tags under `prefix`.
#[must_use]
pub fn builtin_components(prefix: &str) -> Vec<Box<dyn Component>> {
    vec![
        Box::new(Tabs::new(prefix)),
        Box::new(TabItem::new(prefix)),
        Box::new(Accordion::new(prefix)),
        Box::new(AccordionItem::new(prefix)),
        Box::new(Breadcrumbs::new(prefix)),
        Box::new(BreadcrumbItem::new(prefix)),
        Box::new(Select::new(prefix)),
        Box::new(OptionItem::new(prefix)),
        Box::new(DataTable::new(prefix)),
        Box::new(DataTableColumn::new(prefix)),
        Box::new(DataTableRow::new(prefix)),
        Box::new(DataTableCell::new(prefix)),
    ]
}

/// Append the `x-data` attribute carrying a state literal.
fn push_state(out: &mut String, state: &str) {
    push_attr(out, "x-data", state);
}
