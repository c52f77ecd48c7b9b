use crate::document::{HostDocument, MountTarget};
use crate::widget::Widget;
use exohood_config::{ConfigResolver, HostProperties, WidgetConfiguration};
use exohood_view::{render_to_markup, BoundaryError, BoundaryState, InstanceToken, SubtreeFactory};
use std::sync::Arc;
use tracing::{debug, info};

/// A widget rendered into a host element.
#[derive(Debug)]
pub struct MountedWidget<T: MountTarget> {
    widget: Widget,
    target: T,
}

impl<T: MountTarget> MountedWidget<T> {
    /// Render the widget and commit the markup to the host element
    pub fn render(&mut self) -> String {
        let markup = render_to_markup(&self.widget.render());
        self.target.commit(markup.clone());
        markup
    }

    /// Reset the widget and re-render it under the new instance token
    pub fn reset(&mut self) -> Result<InstanceToken, BoundaryError> {
        let token = self.widget.reset()?;
        self.render();
        Ok(token)
    }

    /// Forward a host UI action, re-rendering if it reset the widget
    pub fn activate(&mut self, action: &str) -> Option<InstanceToken> {
        let token = self.widget.activate(action)?;
        self.render();
        Some(token)
    }

    pub fn state(&self) -> &BoundaryState {
        self.widget.state()
    }

    pub fn token(&self) -> InstanceToken {
        self.widget.token()
    }

    pub fn config(&self) -> &Arc<WidgetConfiguration> {
        self.widget.config()
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

/// Mount the widget into the first element matching `selector`.
///
/// The client identifier is read from the document's cookies. A selector
/// that matches nothing is not an error: nothing is rendered and `None` is
/// returned.
pub fn mount<D: HostDocument>(
    document: &D,
    selector: &str,
    properties: HostProperties,
    factory: impl SubtreeFactory + 'static,
) -> Option<MountedWidget<D::Target>> {
    let Some(target) = document.query_selector(selector) else {
        debug!(selector, "Mount target not found, widget not rendered");
        return None;
    };

    let widget = Widget::builder(properties)
        .resolver(ConfigResolver::new(document.cookies()))
        .build(factory);

    Some(attach(widget, target, selector))
}

/// Mount an already configured widget.
pub fn mount_widget<D: HostDocument>(
    document: &D,
    selector: &str,
    widget: Widget,
) -> Option<MountedWidget<D::Target>> {
    let Some(target) = document.query_selector(selector) else {
        debug!(selector, "Mount target not found, widget not rendered");
        return None;
    };

    Some(attach(widget, target, selector))
}

fn attach<T: MountTarget>(widget: Widget, target: T, selector: &str) -> MountedWidget<T> {
    let mut mounted = MountedWidget { widget, target };
    mounted.render();

    info!(selector, token = %mounted.token(), "Widget mounted");
    mounted
}
