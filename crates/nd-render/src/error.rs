//! Error types for rendering.

use crate::context::ContextError;

/// Error while parsing or rendering a declaration tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Markup is not well-formed.
    #[error("markup parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Markup contains invalid UTF-8 or an undecodable name.
    #[error("markup encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Markup ended before an element was closed.
    #[error("<{tag}> is never closed")]
    UnclosedElement {
        /// Element tag.
        tag: String,
    },

    /// An attribute value could not be interpreted.
    #[error("<{tag}> attribute `{name}` has invalid value {value:?} ({expected})")]
    InvalidAttribute {
        /// Element tag.
        tag: String,
        /// Attribute name.
        name: String,
        /// Attribute value as written.
        value: String,
        /// What was expected.
        expected: String,
    },

    /// A child declaration has no enclosing parent (orphan policy `error`).
    #[error("<{tag}> must be declared inside a composite providing {context}")]
    OrphanedChild {
        /// Child tag.
        tag: String,
        /// Context type the child looked for.
        context: &'static str,
    },

    /// Declarations are nested deeper than the configured limit.
    #[error("maximum nesting depth ({max}) exceeded at <{tag}>")]
    DepthExceeded {
        /// Configured limit.
        max: usize,
        /// Element at which the limit was hit.
        tag: String,
    },

    /// A component referenced a data binding that was not supplied.
    #[error("<{tag}> references unknown binding `{name}`")]
    UnknownBinding {
        /// Element tag.
        tag: String,
        /// Binding name.
        name: String,
    },

    /// Client state could not be built.
    #[error("state error: {0}")]
    State(#[from] nd_state::StateError),

    /// Context protocol misuse.
    #[error("context error: {0}")]
    Context(#[from] ContextError),
}
