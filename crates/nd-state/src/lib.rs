//! Declarative client-state literals.
//!
//! Components hand their client-side state to the reactivity runtime as a
//! single object literal embedded in an `x-data` attribute. This crate builds
//! that literal from typed properties and raw method fragments.
//!
//! # Example
//!
//! ```
//! use nd_state::StateBuilder;
//!
//! let state = StateBuilder::new()
//!     .add_boolean_property("open", false)
//!     .add_string_property("label", "It's here")
//!     .add_toggle_method("open")
//!     .build();
//!
//! assert_eq!(
//!     state,
//!     r"{ open: false, label: 'It\'s here', openToggle() { this.open = !this.open; } }"
//! );
//! ```
//!
//! Method fragments are trusted input: they are appended verbatim and never
//! parsed, so a malformed fragment surfaces only when the client runtime
//! evaluates the literal.

mod builder;
mod case;
mod error;
mod escape;
mod value;

pub use builder::StateBuilder;
pub use case::{camel_case_keys, to_camel_case};
pub use error::StateError;
pub use escape::{escape_html, escape_js_string};
pub use value::StateValue;
