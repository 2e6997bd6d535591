//! Registry of components keyed by declaration tag.

use std::collections::HashMap;

use crate::component::Component;

/// Components available to a [`Renderer`](crate::Renderer).
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Box<dyn Component>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under its tag, replacing any previous one.
    pub fn register(&mut self, component: Box<dyn Component>) {
        let tag = component.tag().to_ascii_lowercase();
        if self.components.insert(tag.clone(), component).is_some() {
            tracing::debug!(tag = %tag, "Replaced registered component");
        }
    }

    /// Component handling `tag`, matched case-insensitively.
    pub fn get(&self, tag: &str) -> Option<&dyn Component> {
        self.components
            .get(&tag.to_ascii_lowercase())
            .map(AsRef::as_ref)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.components.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::component::ComponentOutput;
    use crate::error::RenderError;
    use crate::node::Element;
    use crate::renderer::RenderCx;

    struct Named(&'static str);

    impl Component for Named {
        fn tag(&self) -> &str {
            self.0
        }

        fn render(&self, _: &Element, _: &mut RenderCx<'_>) -> Result<ComponentOutput, RenderError> {
            Ok(ComponentOutput::html(self.0))
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ComponentRegistry::new();
        registry.register(Box::new(Named("nd-b")));
        registry.register(Box::new(Named("nd-a")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.tags(), vec!["nd-a", "nd-b"]);
        assert!(registry.get("ND-A").is_some());
        assert!(registry.get("nd-c").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ComponentRegistry::new();
        registry.register(Box::new(Named("nd-a")));
        registry.register(Box::new(Named("nd-a")));
        assert_eq!(registry.len(), 1);
    }
}
