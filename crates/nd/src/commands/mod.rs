//! CLI command implementations.

pub(crate) mod components;
pub(crate) mod render;

pub(crate) use components::ComponentsArgs;
pub(crate) use render::RenderArgs;
