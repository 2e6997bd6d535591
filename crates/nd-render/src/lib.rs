//! Server-side renderer for component declarations.
//!
//! This crate turns a tree of component declarations into HTML wired to a
//! declarative client runtime through `x-data` state literals.
//!
//! # Architecture
//!
//! - [`parse_markup`] reads declarations into a [`Node`] tree
//! - [`Renderer`] walks the tree depth-first, dispatching registered
//!   [`Component`]s and passing unregistered elements through
//! - [`RenderCx`] carries the per-render [`RenderScope`], the stack of open
//!   composite [`Context`]s that child declarations contribute to
//!
//! A composite registers its context, renders its children to completion, then
//! reads the items they contributed in declaration order. Children look the
//! context up by type, so nested composites of the same kind never see each
//! other's items. A child without a parent is handled by the configured
//! [`OrphanPolicy`].
//!
//! The built-in composites (tabs, accordion, breadcrumbs, select, data table)
//! live in [`components`].
//!
//! # Example
//!
//! ```
//! use nd_render::{RenderOptions, Renderer};
//!
//! let renderer = Renderer::new(RenderOptions::default()).with_builtins();
//! let result = renderer
//!     .render_markup(r#"<nd-tabs>
//!         <nd-tab-item title="macOS">Install with Homebrew.</nd-tab-item>
//!         <nd-tab-item title="Linux">Install with apt.</nd-tab-item>
//!     </nd-tabs>"#)
//!     .unwrap();
//!
//! assert!(result.html.starts_with(r#"<div x-data="{ tabSelected: 1, tabId: &#x27;tabs-0&#x27;"#));
//! assert!(result.html.contains(r#"role="tab""#));
//! assert!(result.warnings.is_empty());
//! ```

mod bindings;
mod component;
pub mod components;
mod context;
mod error;
mod html;
mod ids;
mod node;
mod parser;
mod registry;
mod renderer;
mod scope;

pub use bindings::{Bindings, FieldMap, Row};
pub use component::{Component, ComponentOutput};
pub use context::{CompositeContext, Context, ContextError, ContextState};
pub use error::RenderError;
pub use ids::{IdGenerator, IdStrategy};
pub use node::{Attributes, Element, Node};
pub use parser::{DEFAULT_PARSE_DEPTH, parse_markup, parse_markup_with_depth};
pub use registry::ComponentRegistry;
pub use renderer::{
    ComponentDefaults, DEFAULT_PREFIX, OrphanPolicy, RenderCx, RenderOptions, RenderResult,
    Renderer,
};
pub use scope::{ContextToken, RenderScope};
