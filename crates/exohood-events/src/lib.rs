//! # Exohood Events
//!
//! The event bus the host page uses to observe what happens inside the
//! widget, without coupling to its component structure.
//!
//! - **Process-wide**: [`on`] subscribes on [`EventBus::global`], which is
//!   available before, during, and after any mount
//! - **Ordered**: listeners for one type fire in registration order
//! - **Fail-open**: a failing listener never affects the publisher or the
//!   listeners after it
//! - **Frozen catalog**: [`EVENTS`] names every type the widget publishes

mod bus;
mod catalog;
mod event;

pub use bus::{
    describe_panic, on, DispatchReport, EventBus, ListenerError, ListenerFailure, ListenerFn,
    ListenerResult,
};
pub use catalog::{
    EventCatalog, EVENTS, GATEWAY_OPENED, GATEWAY_REDIRECTED, PURCHASE_COMPLETED,
    PURCHASE_FAILED, PURCHASE_PENDING,
};
pub use event::EventContext;
