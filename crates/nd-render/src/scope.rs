//! Render scope: the stack of open composite contexts for one render.

use std::any::{Any, type_name};
use std::marker::PhantomData;

use crate::context::{CompositeContext, Context, ContextError};
use crate::ids::IdGenerator;

/// One registered context.
struct Frame {
    name: &'static str,
    context: Box<dyn Any>,
}

/// Proof of registration, redeemed by [`RenderScope::close`].
#[must_use = "a registered context must be closed by the composite that opened it"]
#[derive(Debug)]
pub struct ContextToken<C> {
    depth: usize,
    _marker: PhantomData<fn() -> C>,
}

impl<C> ContextToken<C> {
    /// Stack depth at which the context was registered.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Per-render stack of composite contexts, keyed by context type.
///
/// Composites push a context before rendering their children and pop it
/// afterwards, so a lookup always finds the nearest enclosing context of the
/// requested type and sibling composites never see each other's contexts.
///
/// # Example
///
/// ```
/// use nd_render::{CompositeContext, Context, RenderScope};
///
/// struct MenuContext;
///
/// impl CompositeContext for MenuContext {
///     type Item = &'static str;
/// }
///
/// let mut scope = RenderScope::default();
/// let token = scope.register(Context::new(MenuContext));
///
/// scope.contribute::<MenuContext>("Open").unwrap();
/// scope.contribute::<MenuContext>("Save").unwrap();
///
/// let menu = scope.close(token).unwrap();
/// assert_eq!(menu.items(), ["Open", "Save"]);
/// assert!(scope.lookup::<MenuContext>().is_err());
/// ```
#[derive(Default)]
pub struct RenderScope {
    frames: Vec<Frame>,
    ids: IdGenerator,
}

impl RenderScope {
    /// Create an empty scope using the given id generator.
    #[must_use]
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            frames: Vec::new(),
            ids,
        }
    }

    /// Register a context for the subtree about to be rendered.
    pub fn register<C: CompositeContext>(&mut self, context: Context<C>) -> ContextToken<C> {
        let depth = self.frames.len();
        tracing::debug!(context = type_name::<C>(), depth, "Registered render context");
        self.frames.push(Frame {
            name: type_name::<C>(),
            context: Box::new(context),
        });
        ContextToken {
            depth,
            _marker: PhantomData,
        }
    }

    /// Nearest enclosing context of type `C`.
    pub fn lookup<C: CompositeContext>(&mut self) -> Result<&mut Context<C>, ContextError> {
        tracing::trace!(context = type_name::<C>(), "Looking up render context");
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.context.downcast_mut::<Context<C>>())
            .ok_or(ContextError::Missing {
                context: type_name::<C>(),
            })
    }

    /// Nearest enclosing context of type `C`, read-only.
    pub fn get<C: CompositeContext>(&self) -> Result<&Context<C>, ContextError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.context.downcast_ref::<Context<C>>())
            .ok_or(ContextError::Missing {
                context: type_name::<C>(),
            })
    }

    /// Contribute an item to the nearest enclosing context of type `C`.
    pub fn contribute<C: CompositeContext>(&mut self, item: C::Item) -> Result<(), ContextError> {
        self.lookup::<C>()?.contribute(item)
    }

    /// Pop and close the context registered with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::OutOfOrder`] if the context is not the innermost
    /// open one.
    pub fn close<C: CompositeContext>(
        &mut self,
        token: ContextToken<C>,
    ) -> Result<Context<C>, ContextError> {
        let out_of_order = ContextError::OutOfOrder {
            context: type_name::<C>(),
        };

        if self.frames.len() != token.depth + 1 {
            return Err(out_of_order);
        }
        let frame = self.frames.pop().ok_or_else(|| out_of_order.clone())?;
        match frame.context.downcast::<Context<C>>() {
            Ok(context) => {
                let mut context = *context;
                context.close();
                tracing::debug!(
                    context = frame.name,
                    items = context.len(),
                    "Closed render context"
                );
                Ok(context)
            }
            Err(other) => {
                self.frames.push(Frame {
                    name: frame.name,
                    context: other,
                });
                Err(out_of_order)
            }
        }
    }

    /// Drop every context registered at or above `depth`.
    ///
    /// Used when rendering a subtree fails before its composite could close.
    pub fn unwind(&mut self, depth: usize) {
        for frame in self.frames.drain(depth.min(self.frames.len())..) {
            tracing::debug!(context = frame.name, "Discarded render context");
        }
    }

    /// Number of open contexts.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Next element id for `kind`.
    pub fn next_id(&mut self, kind: &str) -> String {
        self.ids.next(kind)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::ContextState;

    #[derive(Debug)]
    struct OuterContext;

    impl CompositeContext for OuterContext {
        type Item = &'static str;
    }

    #[derive(Debug)]
    struct ListContext {
        label: &'static str,
    }

    impl CompositeContext for ListContext {
        type Item = u32;
    }

    #[test]
    fn test_lookup_missing_returns_error() {
        let mut scope = RenderScope::default();
        let err = scope.lookup::<ListContext>().unwrap_err();
        assert!(matches!(err, ContextError::Missing { .. }));
        assert!(scope.contribute::<ListContext>(1).is_err());
    }

    #[test]
    fn test_register_contribute_close() {
        let mut scope = RenderScope::default();
        let token = scope.register(Context::new(ListContext { label: "a" }));

        for n in 1..=3 {
            scope.contribute::<ListContext>(n).unwrap();
        }

        let ctx = scope.close(token).unwrap();
        assert_eq!(ctx.items(), [1, 2, 3]);
        assert_eq!(ctx.state(), ContextState::Closed);
        assert_eq!(scope.depth(), 0);
    }

    #[test]
    fn test_nested_same_type_shadows() {
        let mut scope = RenderScope::default();
        let outer = scope.register(Context::new(ListContext { label: "outer" }));
        scope.contribute::<ListContext>(1).unwrap();

        let inner = scope.register(Context::new(ListContext { label: "inner" }));
        assert_eq!(scope.get::<ListContext>().unwrap().settings().label, "inner");
        scope.contribute::<ListContext>(2).unwrap();
        let inner = scope.close(inner).unwrap();

        scope.contribute::<ListContext>(3).unwrap();
        let outer = scope.close(outer).unwrap();

        assert_eq!(inner.items(), [2]);
        assert_eq!(outer.items(), [1, 3]);
    }

    #[test]
    fn test_lookup_skips_other_types() {
        let mut scope = RenderScope::default();
        let list = scope.register(Context::new(ListContext { label: "list" }));
        let outer = scope.register(Context::new(OuterContext));

        scope.contribute::<ListContext>(9).unwrap();
        scope.contribute::<OuterContext>("x").unwrap();

        let outer = scope.close(outer).unwrap();
        let list = scope.close(list).unwrap();
        assert_eq!(outer.items(), ["x"]);
        assert_eq!(list.items(), [9]);
    }

    #[test]
    fn test_close_out_of_order_is_rejected() {
        let mut scope = RenderScope::default();
        let outer = scope.register(Context::new(OuterContext));
        let inner = scope.register(Context::new(ListContext { label: "inner" }));

        let err = scope.close(outer).unwrap_err();
        assert!(matches!(err, ContextError::OutOfOrder { .. }));
        assert_eq!(scope.depth(), 2);

        scope.close(inner).unwrap();
        assert_eq!(scope.depth(), 1);
    }

    #[test]
    fn test_unwind() {
        let mut scope = RenderScope::default();
        let _outer = scope.register(Context::new(OuterContext));
        let inner = scope.register(Context::new(ListContext { label: "inner" }));
        let depth = inner.depth();

        scope.unwind(depth);
        assert_eq!(scope.depth(), 1);
        assert!(scope.lookup::<ListContext>().is_err());
        assert!(scope.lookup::<OuterContext>().is_ok());
    }

    #[test]
    fn test_next_id() {
        let mut scope = RenderScope::default();
        assert_eq!(scope.next_id("tabs"), "tabs-0");
        assert_eq!(scope.next_id("tabs"), "tabs-1");
    }
}
