//! Declaration tree renderer.

use nd_state::escape_html;

use crate::bindings::Bindings;
use crate::component::{Component, ComponentOutput};
use crate::components::builtin_components;
use crate::context::{CompositeContext, Context, ContextError};
use crate::error::RenderError;
use crate::html::{is_void, push_open_tag};
use crate::ids::{IdGenerator, IdStrategy};
use crate::node::{Element, Node};
use crate::parser::parse_markup_with_depth;
use crate::registry::ComponentRegistry;
use crate::scope::{ContextToken, RenderScope};

/// Default tag prefix of the built-in components.
pub const DEFAULT_PREFIX: &str = "nd-";

/// What happens when a child declaration finds no enclosing parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OrphanPolicy {
    /// Drop the child silently.
    #[default]
    Ignore,
    /// Drop the child and record a render warning.
    Warn,
    /// Fail the render with [`RenderError::OrphanedChild`].
    Error,
}

/// Fallback values used by built-in components when an attribute is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDefaults {
    /// Placeholder shown by an empty select.
    pub select_placeholder: String,
    /// Rows per page of a data table.
    pub data_table_per_page: usize,
    /// Separator between breadcrumb items.
    pub breadcrumb_separator: String,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            select_placeholder: "Select option".to_owned(),
            data_table_per_page: 10,
            breadcrumb_separator: "/".to_owned(),
        }
    }
}

/// Options shared by every render of a [`Renderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Element id generation.
    pub id_strategy: IdStrategy,
    /// Prefix prepended to generated ids.
    pub id_prefix: String,
    /// Maximum element nesting depth.
    pub max_depth: usize,
    /// Handling of child declarations without a parent.
    pub orphans: OrphanPolicy,
    /// Tag prefix of the built-in components.
    pub component_prefix: String,
    /// Attribute fallbacks for built-in components.
    pub defaults: ComponentDefaults,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            id_prefix: String::new(),
            max_depth: 64,
            orphans: OrphanPolicy::default(),
            component_prefix: DEFAULT_PREFIX.to_owned(),
            defaults: ComponentDefaults::default(),
        }
    }
}

impl RenderOptions {
    /// Set the id strategy.
    #[must_use]
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Set the generated id prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the orphan policy.
    #[must_use]
    pub fn with_orphans(mut self, policy: OrphanPolicy) -> Self {
        self.orphans = policy;
        self
    }

    /// Set the built-in component tag prefix.
    #[must_use]
    pub fn with_component_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.component_prefix = prefix.into();
        self
    }

    /// Set the component defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ComponentDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// Result of rendering a declaration tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Non-fatal problems found while rendering.
    pub warnings: Vec<String>,
}

/// Renders declaration trees with a fixed set of components.
///
/// A renderer holds no per-render state and can be shared across threads;
/// each call to [`render`](Self::render) owns a fresh [`RenderScope`].
///
/// # Example
///
/// ```
/// use nd_render::{RenderOptions, Renderer};
///
/// let renderer = Renderer::new(RenderOptions::default()).with_builtins();
/// let result = renderer
///     .render_markup(r#"<nd-breadcrumbs show-home="false">
///         <nd-breadcrumb-item href="/docs">Docs</nd-breadcrumb-item>
///         <nd-breadcrumb-item current="true">Install</nd-breadcrumb-item>
///     </nd-breadcrumbs>"#)
///     .unwrap();
///
/// assert!(result.html.contains(r#"<a href="/docs">Docs</a>"#));
/// assert!(result.html.contains(r#"<span aria-current="page">Install</span>"#));
/// ```
pub struct Renderer {
    registry: ComponentRegistry,
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with no components registered.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            registry: ComponentRegistry::new(),
            options,
        }
    }

    /// Register a component.
    #[must_use]
    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.registry.register(Box::new(component));
        self
    }

    /// Register the built-in composites under the configured prefix.
    #[must_use]
    pub fn with_builtins(mut self) -> Self {
        for component in builtin_components(&self.options.component_prefix) {
            self.registry.register(component);
        }
        self
    }

    /// Registered components.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a node list without data bindings.
    pub fn render(&self, nodes: &[Node]) -> Result<RenderResult, RenderError> {
        self.render_with(nodes, &Bindings::default())
    }

    /// Render a node list with caller-supplied data bindings.
    pub fn render_with(
        &self,
        nodes: &[Node],
        bindings: &Bindings,
    ) -> Result<RenderResult, RenderError> {
        let mut cx = RenderCx::new(&self.registry, &self.options, bindings);
        let html = cx.render_nodes(nodes)?;

        tracing::debug!(
            nodes = nodes.len(),
            bytes = html.len(),
            warnings = cx.warnings.len(),
            "Rendered declarations"
        );

        Ok(RenderResult {
            html,
            warnings: cx.warnings,
        })
    }

    /// Parse markup and render it.
    ///
    /// Nesting beyond `max_depth` is rejected while parsing.
    pub fn render_markup(&self, markup: &str) -> Result<RenderResult, RenderError> {
        let nodes = parse_markup_with_depth(markup, self.options.max_depth)?;
        self.render(&nodes)
    }
}

/// Per-render state handed to components.
///
/// Wraps the [`RenderScope`] with the render options, data bindings, and
/// collected warnings.
pub struct RenderCx<'r> {
    registry: &'r ComponentRegistry,
    options: &'r RenderOptions,
    bindings: &'r Bindings,
    scope: RenderScope,
    depth: usize,
    warnings: Vec<String>,
}

impl<'r> RenderCx<'r> {
    fn new(
        registry: &'r ComponentRegistry,
        options: &'r RenderOptions,
        bindings: &'r Bindings,
    ) -> Self {
        let ids = IdGenerator::new(options.id_strategy, options.id_prefix.clone());
        Self {
            registry,
            options,
            bindings,
            scope: RenderScope::new(ids),
            depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Render nodes in document order.
    pub fn render_nodes(&mut self, nodes: &[Node]) -> Result<String, RenderError> {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Element(element) => out.push_str(&self.render_element(element)?),
            }
        }
        Ok(out)
    }

    /// Render the children of `element` to completion.
    pub fn render_children(&mut self, element: &Element) -> Result<String, RenderError> {
        self.render_nodes(&element.children)
    }

    fn render_element(&mut self, element: &Element) -> Result<String, RenderError> {
        if self.depth >= self.options.max_depth {
            return Err(RenderError::DepthExceeded {
                max: self.options.max_depth,
                tag: element.tag.clone(),
            });
        }

        self.depth += 1;
        let registry = self.registry;
        let result = match registry.get(&element.tag) {
            Some(component) => {
                tracing::trace!(tag = %element.tag, depth = self.depth, "Rendering component");
                component
                    .render(element, self)
                    .map(ComponentOutput::into_html)
            }
            None => self.render_passthrough(element),
        };
        self.depth -= 1;
        result
    }

    fn render_passthrough(&mut self, element: &Element) -> Result<String, RenderError> {
        let mut out = String::new();
        push_open_tag(&mut out, &element.tag, &element.attrs);
        if element.children.is_empty() && is_void(&element.tag) {
            out.push_str(" />");
            return Ok(out);
        }
        out.push('>');
        out.push_str(&self.render_children(element)?);
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
        Ok(out)
    }

    /// Register a context for the subtree about to be rendered.
    pub fn provide<C: CompositeContext>(&mut self, context: Context<C>) -> ContextToken<C> {
        self.scope.register(context)
    }

    /// Nearest enclosing context of type `C`.
    pub fn lookup<C: CompositeContext>(&mut self) -> Result<&mut Context<C>, ContextError> {
        self.scope.lookup::<C>()
    }

    /// Settings of the nearest enclosing context of type `C`, if any.
    pub fn settings<C: CompositeContext>(&self) -> Option<&C> {
        self.scope.get::<C>().ok().map(Context::settings)
    }

    /// Contribute to the nearest enclosing context of type `C`.
    pub fn contribute<C: CompositeContext>(&mut self, item: C::Item) -> Result<(), ContextError> {
        self.scope.contribute::<C>(item)
    }

    /// Close a context registered with [`provide`](Self::provide).
    pub fn close<C: CompositeContext>(
        &mut self,
        token: ContextToken<C>,
    ) -> Result<Context<C>, ContextError> {
        self.scope.close(token)
    }

    /// Register `settings` as a context, render the children of `element`
    /// into it, and close it.
    ///
    /// Returns the closed context and the HTML the children wrote (usually
    /// empty, since contributing children suppress their output).
    pub fn collect_children<C: CompositeContext>(
        &mut self,
        settings: C,
        element: &Element,
    ) -> Result<(Context<C>, String), RenderError> {
        let token = self.provide(Context::new(settings));
        let depth = token.depth();
        match self.render_children(element) {
            Ok(html) => Ok((self.close(token)?, html)),
            Err(e) => {
                self.scope.unwind(depth);
                Err(e)
            }
        }
    }

    /// Contribute `item` on behalf of `element`, applying the orphan policy
    /// when no parent context exists.
    ///
    /// Returns whether the item was contributed.
    pub fn contribute_or_report<C: CompositeContext>(
        &mut self,
        element: &Element,
        item: C::Item,
    ) -> Result<bool, RenderError> {
        match self.scope.contribute::<C>(item) {
            Ok(()) => Ok(true),
            Err(ContextError::Missing { context }) => match self.options.orphans {
                OrphanPolicy::Ignore => {
                    tracing::debug!(tag = %element.tag, context, "Dropped orphaned declaration");
                    Ok(false)
                }
                OrphanPolicy::Warn => {
                    self.warn(format!(
                        "<{}> has no enclosing parent and was dropped",
                        element.tag
                    ));
                    Ok(false)
                }
                OrphanPolicy::Error => Err(RenderError::OrphanedChild {
                    tag: element.tag.clone(),
                    context,
                }),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Next element id for `kind`.
    pub fn next_id(&mut self, kind: &str) -> String {
        self.scope.next_id(kind)
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Data bindings of this render.
    pub fn bindings(&self) -> &Bindings {
        self.bindings
    }

    /// Record a non-fatal problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(message = %message, "Render warning");
        self.warnings.push(message);
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Current element nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
