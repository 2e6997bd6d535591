//! Component trait.

use crate::error::RenderError;
use crate::node::Element;
use crate::renderer::RenderCx;

/// Output from rendering one component declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentOutput {
    /// HTML fragment replacing the declaration.
    Html(String),
    /// Nothing is written; the declaration contributed to its parent instead.
    Suppressed,
}

impl ComponentOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    /// HTML to write in place of the declaration.
    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            Self::Html(html) => html,
            Self::Suppressed => String::new(),
        }
    }
}

/// Handler for one declaration tag.
///
/// Components are shared by every render of a [`Renderer`](crate::Renderer);
/// all per-render state lives in the [`RenderCx`], so implementations are
/// usually stateless.
///
/// # Example
///
/// ```
/// use nd_render::{Component, ComponentOutput, Element, RenderCx, RenderError, Renderer, RenderOptions};
///
/// struct Kbd;
///
/// impl Component for Kbd {
///     fn tag(&self) -> &str {
///         "nd-kbd"
///     }
///
///     fn render(&self, element: &Element, cx: &mut RenderCx<'_>) -> Result<ComponentOutput, RenderError> {
///         let inner = cx.render_children(element)?;
///         Ok(ComponentOutput::html(format!("<kbd>{inner}</kbd>")))
///     }
/// }
///
/// let renderer = Renderer::new(RenderOptions::default()).with_component(Kbd);
/// let result = renderer.render_markup("<p>Press <nd-kbd>Ctrl</nd-kbd></p>").unwrap();
/// assert_eq!(result.html, "<p>Press <kbd>Ctrl</kbd></p>");
/// ```
pub trait Component: Send + Sync {
    /// Declaration tag handled by this component (e.g. `nd-tabs`).
    fn tag(&self) -> &str;

    /// Render one declaration.
    fn render(
        &self,
        element: &Element,
        cx: &mut RenderCx<'_>,
    ) -> Result<ComponentOutput, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_html() {
        assert_eq!(ComponentOutput::html("<b>x</b>").into_html(), "<b>x</b>");
        assert_eq!(ComponentOutput::Suppressed.into_html(), "");
    }
}
