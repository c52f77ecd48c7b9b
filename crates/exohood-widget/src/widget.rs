use exohood_config::{AnalyticsPayload, ConfigResolver, HostProperties, WidgetConfiguration};
use exohood_events::EventBus;
use exohood_view::{
    div, BoundaryError, BoundaryState, CrashBoundary, Fallback, InstanceToken, Node,
    SubtreeFactory, RESET_ACTION,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Id of the widget root element
pub const ROOT_ID: &str = "main";

/// The embeddable widget: themed root element around a crash-isolated subtree.
///
/// Holds the host properties so every reset can re-resolve a fresh
/// configuration snapshot.
#[derive(Debug)]
pub struct Widget {
    properties: HostProperties,
    resolver: ConfigResolver,
    boundary: CrashBoundary,
}

/// Options for [`Widget`] that must be fixed before the first subtree is built.
pub struct WidgetBuilder {
    properties: HostProperties,
    resolver: ConfigResolver,
    bus: EventBus,
    fallback: Option<Box<dyn Fallback>>,
}

impl WidgetBuilder {
    pub fn resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Bus the subtree emits on. Defaults to the process-wide bus.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn fallback(mut self, fallback: impl Fallback + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn build(self, factory: impl SubtreeFactory + 'static) -> Widget {
        let config = Arc::new(self.resolver.resolve(&self.properties));
        let mut boundary = CrashBoundary::new(factory, config, self.bus);
        if let Some(fallback) = self.fallback {
            boundary = boundary.with_boxed_fallback(fallback);
        }

        info!(
            token = %boundary.token(),
            collector_id = %self.resolver.collector_id(),
            "Widget created"
        );

        Widget {
            properties: self.properties,
            resolver: self.resolver,
            boundary,
        }
    }
}

impl Widget {
    /// Widget on the global bus with no tracking store
    pub fn new(properties: HostProperties, factory: impl SubtreeFactory + 'static) -> Self {
        Self::builder(properties).build(factory)
    }

    pub fn builder(properties: HostProperties) -> WidgetBuilder {
        WidgetBuilder {
            properties,
            resolver: ConfigResolver::default(),
            bus: EventBus::global(),
            fallback: None,
        }
    }

    /// Render the root element wrapping the subtree (or its fallback).
    pub fn render(&mut self) -> Node {
        let content = self.boundary.render();
        let token = self.boundary.token();
        let theme = &self.boundary.config().theme;

        let mut root = div([content])
            .with_id(ROOT_ID)
            .with_attr("data-instance", token.to_string())
            .with_classes(theme.root_classes());
        for (name, value) in theme.style_tokens() {
            root = root.with_style(name, value);
        }
        root
    }

    /// Re-resolve the configuration from the retained properties and
    /// rebuild the subtree.
    pub fn reset(&mut self) -> Result<InstanceToken, BoundaryError> {
        let config = Arc::new(self.resolver.resolve(&self.properties));
        self.boundary.reset(config)
    }

    /// Dispatch a UI action coming from the host page.
    ///
    /// Returns the new token when the action triggered a reset.
    pub fn activate(&mut self, action: &str) -> Option<InstanceToken> {
        if action != RESET_ACTION {
            debug!(action, "Unknown widget action ignored");
            return None;
        }
        self.reset().ok()
    }

    pub fn state(&self) -> &BoundaryState {
        self.boundary.state()
    }

    pub fn token(&self) -> InstanceToken {
        self.boundary.token()
    }

    pub fn config(&self) -> &Arc<WidgetConfiguration> {
        self.boundary.config()
    }

    pub fn analytics(&self) -> &AnalyticsPayload {
        &self.boundary.config().analytics
    }

    pub fn properties(&self) -> &HostProperties {
        &self.properties
    }

    pub fn bus(&self) -> &EventBus {
        self.boundary.bus()
    }
}
