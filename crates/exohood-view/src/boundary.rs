//! Crash isolation for the widget subtree.
//!
//! A [`CrashBoundary`] owns one subtree built by a [`SubtreeFactory`]. When
//! the subtree returns an error or panics while rendering, the boundary
//! records a [`CrashReport`] and renders its [`Fallback`] instead. The
//! failure never escapes to the host. [`CrashBoundary::reset`] discards the
//! failed subtree and builds a fresh one under a new [`InstanceToken`].

use crate::component::{Component, InstanceToken, RenderContext, SubtreeFactory};
use crate::node::{button, div, element, text, Node};
use exohood_config::WidgetConfiguration;
use exohood_events::{describe_panic, EventBus};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Value of the `data-action` attribute carried by the reset affordance
pub const RESET_ACTION: &str = "reset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The subtree returned a [`RenderError`](crate::RenderError)
    Error,
    /// The subtree panicked
    Panic,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Error => write!(f, "error"),
            FailureKind::Panic => write!(f, "panic"),
        }
    }
}

/// What went wrong inside the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    /// Instance that failed
    pub token: InstanceToken,
    pub component: &'static str,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoundaryState {
    #[default]
    Stable,
    Failed(CrashReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("boundary has not failed; nothing to reset")]
    NotFailed,
}

/// Renders in place of a failed subtree.
pub trait Fallback {
    fn render(&self, report: &CrashReport, cx: &RenderContext) -> Node;
}

impl<F> Fallback for F
where
    F: Fn(&CrashReport, &RenderContext) -> Node,
{
    fn render(&self, report: &CrashReport, cx: &RenderContext) -> Node {
        self(report, cx)
    }
}

/// Default crash view: a short notice and a reset button.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrashView;

impl Fallback for CrashView {
    fn render(&self, _report: &CrashReport, _cx: &RenderContext) -> Node {
        div([
            element("p", [text("Something went wrong.")]).with_class("error-view__message"),
            button("Try again").with_attr("data-action", RESET_ACTION),
        ])
        .with_class("error-view")
        .with_attr("data-error", "crash")
    }
}

pub struct CrashBoundary {
    factory: Box<dyn SubtreeFactory>,
    fallback: Box<dyn Fallback>,
    subtree: Box<dyn Component>,
    context: RenderContext,
    state: BoundaryState,
}

impl CrashBoundary {
    /// Build the first subtree instance under [`InstanceToken::INITIAL`]
    pub fn new(
        factory: impl SubtreeFactory + 'static,
        config: Arc<WidgetConfiguration>,
        bus: EventBus,
    ) -> Self {
        let token = InstanceToken::INITIAL;
        let subtree = factory.build(token);
        Self {
            factory: Box::new(factory),
            fallback: Box::new(CrashView),
            subtree,
            context: RenderContext::new(config, bus, token),
            state: BoundaryState::Stable,
        }
    }

    pub fn with_fallback(self, fallback: impl Fallback + 'static) -> Self {
        self.with_boxed_fallback(Box::new(fallback))
    }

    pub fn with_boxed_fallback(mut self, fallback: Box<dyn Fallback>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Render the subtree, or the fallback once it has failed.
    ///
    /// A failed boundary keeps rendering the fallback until [`reset`](Self::reset).
    pub fn render(&mut self) -> Node {
        if let BoundaryState::Failed(report) = &self.state {
            return self.fallback.render(report, &self.context);
        }

        let subtree = &mut self.subtree;
        let context = &self.context;
        let (kind, message) = match catch_unwind(AssertUnwindSafe(|| subtree.render(context))) {
            Ok(Ok(node)) => return node,
            Ok(Err(e)) => (FailureKind::Error, e.to_string()),
            Err(payload) => (FailureKind::Panic, describe_panic(payload.as_ref())),
        };

        let report = CrashReport {
            token: self.context.token(),
            component: self.subtree.name(),
            kind,
            message,
        };
        error!(
            token = %report.token,
            component = report.component,
            kind = %report.kind,
            message = %report.message,
            "Widget subtree crashed, showing fallback"
        );

        let node = self.fallback.render(&report, &self.context);
        self.state = BoundaryState::Failed(report);
        node
    }

    /// Discard the failed subtree and build a fresh one against `config`.
    ///
    /// Returns the new instance token. Resetting a stable boundary is an error.
    pub fn reset(
        &mut self,
        config: Arc<WidgetConfiguration>,
    ) -> Result<InstanceToken, BoundaryError> {
        if !self.is_failed() {
            debug!(token = %self.context.token(), "Reset ignored, boundary is stable");
            return Err(BoundaryError::NotFailed);
        }

        let token = self.context.token().next();
        self.subtree = self.factory.build(token);
        self.context = RenderContext::new(config, self.context.bus().clone(), token);
        self.state = BoundaryState::Stable;

        info!(token = %token, "Widget subtree reset");
        Ok(token)
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Failed(_))
    }

    pub fn failure(&self) -> Option<&CrashReport> {
        match &self.state {
            BoundaryState::Failed(report) => Some(report),
            BoundaryState::Stable => None,
        }
    }

    pub fn token(&self) -> InstanceToken {
        self.context.token()
    }

    pub fn config(&self) -> &Arc<WidgetConfiguration> {
        self.context.config()
    }

    pub fn bus(&self) -> &EventBus {
        self.context.bus()
    }
}

impl fmt::Debug for CrashBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrashBoundary")
            .field("token", &self.context.token())
            .field("component", &self.subtree.name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::RenderError;
    use exohood_config::{ConfigResolver, HostProperties};

    fn config() -> Arc<WidgetConfiguration> {
        Arc::new(ConfigResolver::default().resolve(&HostProperties::new("k1")))
    }

    fn failing(_token: InstanceToken) -> Box<dyn Component> {
        Box::new(|_cx: &RenderContext| Err::<Node, _>(RenderError::failed("boom")))
    }

    #[test]
    fn crash_view_offers_reset_action() {
        let mut boundary = CrashBoundary::new(failing, config(), EventBus::new());
        let node = boundary.render();

        let action = node.find_by_attr("data-action", RESET_ACTION);
        assert_eq!(action.map(Node::text_content).as_deref(), Some("Try again"));
        assert!(node.text_content().contains("Something went wrong."));
    }

    #[test]
    fn report_records_kind_and_message() {
        let mut boundary = CrashBoundary::new(failing, config(), EventBus::new());
        boundary.render();

        let report = boundary.failure().unwrap();
        assert_eq!(report.kind, FailureKind::Error);
        assert_eq!(report.message, "render failed: boom");
        assert_eq!(report.component, "closure");
        assert_eq!(report.token, InstanceToken::INITIAL);
    }

    #[test]
    fn custom_fallback_sees_report() {
        let mut boundary = CrashBoundary::new(failing, config(), EventBus::new())
            .with_fallback(|report: &CrashReport, _cx: &RenderContext| text(report.message.clone()));

        assert_eq!(boundary.render(), text("render failed: boom"));
    }

    #[test]
    fn failure_kind_display() {
        assert_eq!(FailureKind::Error.to_string(), "error");
        assert_eq!(FailureKind::Panic.to_string(), "panic");
    }
}
