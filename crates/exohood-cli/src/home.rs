//! Stand-in home view rendered inside the widget for previews.

use exohood_view::{
    button, div, element, text, Component, InstanceToken, Node, RenderContext, RenderError,
    SubtreeFactory,
};

const DEFAULT_CRYPTO: &str = "BTC";
const DEFAULT_FIAT: &str = "EUR";

pub struct HomeView {
    token: InstanceToken,
    crash: bool,
}

impl HomeView {
    pub fn new(token: InstanceToken) -> Self {
        Self {
            token,
            crash: false,
        }
    }

    pub fn crashing(token: InstanceToken) -> Self {
        Self { token, crash: true }
    }
}

impl Component for HomeView {
    fn render(&mut self, cx: &RenderContext) -> Result<Node, RenderError> {
        if self.crash {
            return Err(RenderError::failed("quote service unavailable"));
        }

        let config = cx.config();
        let crypto = config.default_crypto.as_deref().unwrap_or(DEFAULT_CRYPTO);
        let fiat = config.default_fiat.as_deref().unwrap_or(DEFAULT_FIAT);

        let mut children = vec![element("h2", [text(format!("Buy {}", crypto))])];

        if let Some(amount) = config.default_amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(RenderError::InvalidConfiguration {
                    field: "defaultAmount".to_string(),
                    reason: format!("{} is not a valid amount", amount),
                });
            }
            children.push(element("p", [text(format!("You pay {} {}", amount, fiat))]));
        }

        children.push(button("Continue").with_attr("data-action", "quote"));

        Ok(div(children)
            .with_class("home-view")
            .with_attr("data-token", self.token.to_string()))
    }

    fn name(&self) -> &'static str {
        "HomeView"
    }
}

/// Factory for the home view. With `crash_first`, the initial instance fails
/// and every instance built by a reset renders normally.
pub fn factory(crash_first: bool) -> impl SubtreeFactory {
    move |token: InstanceToken| -> Box<dyn Component> {
        if crash_first && token == InstanceToken::INITIAL {
            Box::new(HomeView::crashing(token))
        } else {
            Box::new(HomeView::new(token))
        }
    }
}
