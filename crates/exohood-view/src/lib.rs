//! Node tree, markup rendering, and the crash boundary that isolates the
//! widget subtree from the host.

mod boundary;
mod component;
mod node;
mod render;

pub use boundary::{
    BoundaryError, BoundaryState, CrashBoundary, CrashReport, CrashView, Fallback, FailureKind,
    RESET_ACTION,
};
pub use component::{Component, InstanceToken, RenderContext, RenderError, SubtreeFactory};
pub use node::{button, div, element, fragment, text, ElementNode, Node, TextNode};
pub use render::render_to_markup;
