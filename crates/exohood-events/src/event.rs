//! Event records delivered to host listeners.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An occurrence inside the widget, as seen by the host.
///
/// The serialized form uses the host-facing field names:
/// `{ "type": .., "gateway": .., "trackingUrl"?: .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// Event type discriminant (e.g. `purchase.completed`)
    #[serde(rename = "type")]
    pub event_type: String,

    /// Gateway the occurrence relates to
    pub gateway: String,

    /// Optional tracking reference handed out by the gateway
    #[serde(
        rename = "trackingUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_url: Option<String>,
}

impl EventContext {
    /// Create a new event record
    pub fn new(event_type: impl Into<String>, gateway: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            gateway: gateway.into(),
            tracking_url: None,
        }
    }

    /// Attach a tracking reference
    pub fn with_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_url = Some(url.into());
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl fmt::Display for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.event_type, self.gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_host_field_names() {
        let event = EventContext::new("purchase.completed", "g1")
            .with_tracking_url("https://gw.example/track/42");

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "purchase.completed",
                "gateway": "g1",
                "trackingUrl": "https://gw.example/track/42"
            })
        );
    }

    #[test]
    fn omits_missing_tracking_url() {
        let event = EventContext::new("gateway.opened", "moonpay");
        let value = serde_json::to_value(&event).unwrap();

        assert!(value.get("trackingUrl").is_none());
    }

    #[test]
    fn parses_host_payload_without_tracking_url() {
        let event: EventContext =
            serde_json::from_value(json!({"type": "purchase.failed", "gateway": "g2"})).unwrap();

        assert_eq!(event.event_type(), "purchase.failed");
        assert_eq!(event.tracking_url, None);
    }

    #[test]
    fn display_shows_type_and_gateway() {
        let event = EventContext::new("purchase.completed", "g1");
        assert_eq!(event.to_string(), "purchase.completed@g1");
    }
}
