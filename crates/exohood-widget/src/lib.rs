//! # Exohood Widget
//!
//! Embedding surface of the Exohood purchase widget. A host page mounts the
//! widget into one of its elements and observes it through the event bus:
//!
//! ```rust
//! use exohood_widget::{mount, on, text, Component, HostProperties, InstanceToken, MemoryDocument, RenderContext, RenderError, EVENTS};
//!
//! on(EVENTS.get("PURCHASE_COMPLETED").unwrap_or_default(), |event| {
//!     println!("completed via {}", event.gateway);
//! });
//!
//! let document = MemoryDocument::new().with_element("#widget");
//! let home = |_token: InstanceToken| -> Box<dyn Component> {
//!     Box::new(|_cx: &RenderContext| Ok::<_, RenderError>(text("Buy crypto")))
//! };
//!
//! let mounted = mount(&document, "#widget", HostProperties::new("k1"), home);
//! assert!(mounted.is_some());
//! assert!(document.markup("#widget").unwrap_or_default().contains("Buy crypto"));
//! ```

pub mod document;
pub mod logging;
mod mount;
mod widget;

pub use document::{HostDocument, MemoryDocument, MemoryTarget, MountTarget};
pub use mount::{mount, mount_widget, MountedWidget};
pub use widget::{Widget, WidgetBuilder, ROOT_ID};

pub use exohood_config::{ConfigResolver, CookieJar, HostProperties, WidgetConfiguration};
pub use exohood_events::{on, EventBus, EventContext, EVENTS};
pub use exohood_view::{
    text, BoundaryState, Component, CrashReport, Fallback, InstanceToken, Node, RenderContext,
    RenderError, SubtreeFactory, RESET_ACTION,
};
