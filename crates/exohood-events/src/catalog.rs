//! The frozen catalog of event types the widget publishes.
//!
//! Hosts look names up here instead of hard-coding type strings:
//!
//! ```rust
//! use exohood_events::EVENTS;
//!
//! assert_eq!(EVENTS.get("PURCHASE_COMPLETED"), Some("purchase.completed"));
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const PURCHASE_COMPLETED: &str = "purchase.completed";
pub const PURCHASE_PENDING: &str = "purchase.pending";
pub const PURCHASE_FAILED: &str = "purchase.failed";
pub const GATEWAY_OPENED: &str = "gateway.opened";
pub const GATEWAY_REDIRECTED: &str = "gateway.redirected";

const ENTRIES: &[(&str, &str)] = &[
    ("PURCHASE_COMPLETED", PURCHASE_COMPLETED),
    ("PURCHASE_PENDING", PURCHASE_PENDING),
    ("PURCHASE_FAILED", PURCHASE_FAILED),
    ("GATEWAY_OPENED", GATEWAY_OPENED),
    ("GATEWAY_REDIRECTED", GATEWAY_REDIRECTED),
];

/// Public name → event type mapping. Read-only once built.
pub static EVENTS: LazyLock<EventCatalog> = LazyLock::new(EventCatalog::builtin);

/// Immutable mapping from constant-style names to event-type strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventCatalog {
    entries: BTreeMap<&'static str, &'static str>,
}

impl EventCatalog {
    fn builtin() -> Self {
        Self {
            entries: ENTRIES.iter().copied().collect(),
        }
    }

    /// Event type for a catalog name
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name).copied()
    }

    /// Whether `event_type` is one of the published types
    pub fn contains_type(&self, event_type: &str) -> bool {
        self.entries.values().any(|t| *t == event_type)
    }

    /// Iterate `(name, event_type)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PURCHASE_COMPLETED", "purchase.completed")]
    #[test_case("PURCHASE_PENDING", "purchase.pending")]
    #[test_case("PURCHASE_FAILED", "purchase.failed")]
    #[test_case("GATEWAY_OPENED", "gateway.opened")]
    #[test_case("GATEWAY_REDIRECTED", "gateway.redirected")]
    fn catalog_maps_name_to_type(name: &str, event_type: &str) {
        assert_eq!(EVENTS.get(name), Some(event_type));
        assert!(EVENTS.contains_type(event_type));
    }

    #[test]
    fn unknown_name_is_absent() {
        assert_eq!(EVENTS.get("NOT_AN_EVENT"), None);
        assert!(!EVENTS.contains_type("not.an.event"));
    }

    #[test]
    fn iterates_in_name_order() {
        let names: Vec<_> = EVENTS.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();

        assert_eq!(names, sorted);
        assert_eq!(EVENTS.len(), ENTRIES.len());
        assert!(!EVENTS.is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let value = serde_json::to_value(&*EVENTS).unwrap();
        assert_eq!(value["PURCHASE_COMPLETED"], "purchase.completed");
    }
}
