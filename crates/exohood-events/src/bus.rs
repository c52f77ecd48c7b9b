//! Publish/subscribe registry keyed by event type.
//!
//! Dispatch is synchronous and fail-open: a listener that returns an error or
//! panics is logged and skipped, and the remaining listeners still run.
//!
//! ```rust
//! use exohood_events::{EventBus, EventContext};
//!
//! let bus = EventBus::new();
//! bus.subscribe("purchase.completed", |event| {
//!     println!("purchase via {}", event.gateway);
//! });
//!
//! let report = bus.publish(
//!     "purchase.completed",
//!     &EventContext::new("purchase.completed", "g1"),
//! );
//! assert_eq!(report.invoked, 1);
//! ```

use crate::event::EventContext;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors a listener can report back to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    /// The listener returned an error.
    #[error("{0}")]
    Failed(String),

    /// The listener panicked.
    #[error("listener panicked: {0}")]
    Panicked(String),
}

impl ListenerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Result type for fallible listeners
pub type ListenerResult = Result<(), ListenerError>;

/// Listener function type
pub type ListenerFn = Arc<dyn Fn(&EventContext) -> ListenerResult + Send + Sync>;

/// A listener failure captured during one publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub event_type: String,
    /// Registration position of the listener within its event type
    pub position: usize,
    pub error: ListenerError,
}

/// Outcome of one publish call. Failures are reported, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of listeners invoked
    pub invoked: usize,
    /// Listeners that failed, in invocation order
    pub failures: Vec<ListenerFailure>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

type Registry = HashMap<String, Vec<ListenerFn>>;

static GLOBAL_BUS: LazyLock<EventBus> = LazyLock::new(EventBus::new);

/// Handle to an event registry.
///
/// Cloning is cheap and every clone sees the same listeners. Listeners are
/// never removed; the registry lives as long as its last handle.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
}

impl EventBus {
    /// Create an isolated bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide bus shared by the host and every mounted widget
    pub fn global() -> Self {
        GLOBAL_BUS.clone()
    }

    /// Register an infallible listener for `event_type`
    pub fn subscribe<F>(&self, event_type: impl Into<String>, listener: F)
    where
        F: Fn(&EventContext) + Send + Sync + 'static,
    {
        self.subscribe_fallible(event_type, move |event| {
            listener(event);
            Ok(())
        });
    }

    /// Register a listener that may report an error
    pub fn subscribe_fallible<F>(&self, event_type: impl Into<String>, listener: F)
    where
        F: Fn(&EventContext) -> ListenerResult + Send + Sync + 'static,
    {
        let event_type = event_type.into();
        let mut registry = self.registry.write();
        let slot = registry.entry(event_type.clone()).or_default();
        slot.push(Arc::new(listener));

        debug!(event_type = %event_type, listeners = slot.len(), "Listener registered");
    }

    /// Invoke every listener registered for `event_type`, in registration order.
    ///
    /// Listeners are snapshotted before dispatch: one registered while this
    /// call is running only sees later publishes.
    pub fn publish(&self, event_type: &str, event: &EventContext) -> DispatchReport {
        let Some(listeners) = self.registry.read().get(event_type).cloned() else {
            trace!(event_type = %event_type, "No listeners, event dropped");
            return DispatchReport::default();
        };

        let mut report = DispatchReport::default();

        for (position, listener) in listeners.iter().enumerate() {
            report.invoked += 1;

            let error = match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(payload) => ListenerError::Panicked(describe_panic(payload.as_ref())),
            };

            // Log and continue (fail-open)
            warn!(
                event_type = %event_type,
                gateway = %event.gateway,
                position,
                error = %error,
                "Listener failed"
            );
            report.failures.push(ListenerFailure {
                event_type: event_type.to_string(),
                position,
                error,
            });
        }

        debug!(
            event_type = %event_type,
            invoked = report.invoked,
            failed = report.failures.len(),
            "Event published"
        );
        report
    }

    /// Publish a record under its own type
    pub fn emit(&self, event: &EventContext) -> DispatchReport {
        self.publish(&event.event_type, event)
    }

    /// Count listeners registered for `event_type`
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.registry.read().get(event_type).map_or(0, Vec::len)
    }

    /// Event types with at least one listener, sorted
    pub fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.registry.read().keys().cloned().collect();
        types.sort_unstable();
        types
    }

    /// Whether two handles share one registry
    pub fn same_bus(&self, other: &EventBus) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("EventBus")
            .field("event_types", &registry.len())
            .field(
                "listeners",
                &registry.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

/// Subscribe on the process-wide bus.
///
/// Works before, during, or after any widget mount.
pub fn on<F>(event_type: impl Into<String>, listener: F)
where
    F: Fn(&EventContext) + Send + Sync + 'static,
{
    EventBus::global().subscribe(event_type, listener);
}

/// Best-effort message from a panic payload
pub fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
