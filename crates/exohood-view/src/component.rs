//! Components, the context they render against, and their factories.

use crate::node::Node;
use exohood_config::{AnalyticsPayload, Theme, WidgetConfiguration};
use exohood_events::{DispatchReport, EventBus, EventContext};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Identity of one mounted subtree. Changes on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InstanceToken(u64);

impl InstanceToken {
    pub const INITIAL: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors a component can raise while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Rendering failed.
    #[error("render failed: {0}")]
    Failed(String),

    /// A configuration value the component depends on is unusable.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

impl RenderError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// What a subtree sees while rendering: the resolved configuration (the
/// API/context provider), the analytics payload (the data-layer provider),
/// the event bus, and its own instance token.
#[derive(Debug, Clone)]
pub struct RenderContext {
    config: Arc<WidgetConfiguration>,
    bus: EventBus,
    token: InstanceToken,
}

impl RenderContext {
    pub fn new(config: Arc<WidgetConfiguration>, bus: EventBus, token: InstanceToken) -> Self {
        Self { config, bus, token }
    }

    pub fn config(&self) -> &Arc<WidgetConfiguration> {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn analytics(&self) -> &AnalyticsPayload {
        &self.config.analytics
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn token(&self) -> InstanceToken {
        self.token
    }

    /// Publish a record to the host under its own type
    pub fn emit(&self, event: &EventContext) -> DispatchReport {
        self.bus.emit(event)
    }
}

/// A piece of UI owning its own instance state.
pub trait Component {
    fn render(&mut self, cx: &RenderContext) -> Result<Node, RenderError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> Component for F
where
    F: FnMut(&RenderContext) -> Result<Node, RenderError>,
{
    fn render(&mut self, cx: &RenderContext) -> Result<Node, RenderError> {
        self(cx)
    }

    fn name(&self) -> &'static str {
        "closure"
    }
}

/// Builds a fresh subtree for an instance token.
///
/// Called at mount and again on every reset, so no state from a failed
/// subtree is carried over.
pub trait SubtreeFactory {
    fn build(&self, token: InstanceToken) -> Box<dyn Component>;
}

impl<F> SubtreeFactory for F
where
    F: Fn(InstanceToken) -> Box<dyn Component>,
{
    fn build(&self, token: InstanceToken) -> Box<dyn Component> {
        self(token)
    }
}
