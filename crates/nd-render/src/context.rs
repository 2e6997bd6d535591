//! Composite contexts: the collections children contribute to.
//!
//! A composite component creates a [`Context`] holding its settings, registers
//! it on the [`RenderScope`](crate::RenderScope), and renders its children.
//! Each child looks the context up by type and contributes one item. After
//! the children finish, the composite closes the context and reads the items
//! in contribution order.
//!
//! ```text
//! Open ──close()──▶ Closed
//!  │                  │
//!  contribute() ok    contribute() → ContextError::Closed
//! ```

use std::any::type_name;

/// Settings type of a composite, naming the items its children contribute.
///
/// # Example
///
/// ```
/// use nd_render::{CompositeContext, Context};
///
/// struct StepsContext {
///     numbered: bool,
/// }
///
/// impl CompositeContext for StepsContext {
///     type Item = String;
/// }
///
/// let mut ctx = Context::new(StepsContext { numbered: true });
/// ctx.contribute("Install".to_owned()).unwrap();
/// ctx.contribute("Configure".to_owned()).unwrap();
/// ctx.close();
///
/// assert!(ctx.settings().numbered);
/// assert_eq!(ctx.items(), ["Install", "Configure"]);
/// assert!(ctx.contribute("Late".to_owned()).is_err());
/// ```
pub trait CompositeContext: 'static {
    /// Structured item contributed by one child declaration.
    type Item: 'static;
}

/// Lifecycle state of a [`Context`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Accepting contributions.
    Open,
    /// Frozen; contributions fail.
    Closed,
}

/// Per-render collection a composite gathers child contributions into.
#[derive(Debug)]
pub struct Context<C: CompositeContext> {
    settings: C,
    items: Vec<C::Item>,
    state: ContextState,
}

impl<C: CompositeContext> Context<C> {
    /// Create an open, empty context.
    #[must_use]
    pub fn new(settings: C) -> Self {
        Self {
            settings,
            items: Vec::new(),
            state: ContextState::Open,
        }
    }

    /// Settings the composite configured for its children.
    pub fn settings(&self) -> &C {
        &self.settings
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Closed`] once the context has been closed.
    pub fn contribute(&mut self, item: C::Item) -> Result<(), ContextError> {
        if self.state == ContextState::Closed {
            return Err(ContextError::Closed {
                context: type_name::<C>(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Freeze the item list.
    pub fn close(&mut self) {
        self.state = ContextState::Closed;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Contributed items in contribution order.
    pub fn items(&self) -> &[C::Item] {
        &self.items
    }

    /// Number of contributed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no child contributed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into settings and items.
    pub fn into_parts(self) -> (C, Vec<C::Item>) {
        (self.settings, self.items)
    }
}

/// Error from the context protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ContextError {
    /// No enclosing composite registered this context type.
    #[error("no enclosing {context}")]
    Missing {
        /// Context type name.
        context: &'static str,
    },
    /// The context no longer accepts contributions.
    #[error("{context} is closed")]
    Closed {
        /// Context type name.
        context: &'static str,
    },
    /// A context was closed while a context registered after it was still open.
    #[error("{context} closed out of order")]
    OutOfOrder {
        /// Context type name.
        context: &'static str,
    },
}
