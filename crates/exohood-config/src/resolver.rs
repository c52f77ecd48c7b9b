//! Configuration resolution
//!
//! Turns a [`HostProperties`] bag into a fully populated, immutable
//! [`WidgetConfiguration`]:
//! 1. Literal defaults for unspecified presentation fields
//! 2. The theme token derived from the resolved color
//! 3. Pass-through of every other recognized option
//! 4. The analytics payload (collector id + data layer)

use crate::properties::HostProperties;
use crate::tracking::{ClientTrackingStore, NoTracking, CLIENT_ID_KEY};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Theme color used when the host does not supply one
pub const DEFAULT_COLOR: &str = "#0316C1";

/// Font family used when the host does not supply one; defers to the host page
pub const DEFAULT_FONT_FAMILY: &str = "inherit";

/// Default analytics container; override with [`ConfigResolver::with_collector_id`]
pub const GTM_ID: &str = "GTM-EXOHOOD";

/// Strip the single leading marker character from a color (`#0316C1` → `0316C1`).
pub fn theme_token(color: &str) -> String {
    let mut chars = color.chars();
    chars.next();
    chars.as_str().to_string()
}

/// Presentation parameters handed across the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Host-facing color (`#RRGGBB`)
    pub color: String,
    /// `color` without its leading marker, for internal consumers
    pub theme_token: String,
    pub font_family: String,
    pub class_name: String,
    pub dark_mode: bool,
}

impl Theme {
    /// Named style tokens for the widget root
    pub fn style_tokens(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary-color", self.color.clone()),
            ("--font-family", self.font_family.clone()),
        ]
    }

    /// Class list for the widget root
    pub fn root_classes(&self) -> Vec<String> {
        let mut classes = vec!["isolate-inheritance".to_string(), "theme".to_string()];
        if !self.class_name.trim().is_empty() {
            classes.push(self.class_name.trim().to_string());
        }
        if self.dark_mode {
            classes.push("dark".to_string());
        }
        classes
    }
}

/// Data layer pushed to the analytics provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLayer {
    pub api_key: String,
    /// Persisted client identifier, if the host has one
    pub client_id: Option<String>,
}

/// Analytics payload: collector identifier plus data layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPayload {
    pub collector_id: String,
    pub data_layer: DataLayer,
}

/// Resolved widget configuration.
///
/// Built once per mount and once per reset, then shared read-only
/// (typically as `Arc<WidgetConfiguration>`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfiguration {
    #[serde(rename = "API_KEY")]
    pub api_key: String,

    pub default_amount: Option<f64>,
    pub min_amount_eur: Option<f64>,
    pub default_crypto: Option<String>,
    pub default_fiat: Option<String>,
    pub default_fiat_soft: Option<String>,
    pub default_payment_method: Option<String>,
    pub default_address: Option<String>,
    pub is_address_editable: Option<bool>,
    pub country: Option<String>,
    pub language: Option<String>,

    pub theme: Theme,

    pub display_chat_bubble: Option<bool>,
    pub support_sell: Option<bool>,
    pub support_buy: Option<bool>,
    pub is_amount_editable: Option<bool>,
    pub amount_in_crypto: Option<bool>,
    pub recommended_crypto_currencies: Option<Vec<String>>,
    pub select_gateway_by: Option<String>,
    #[serde(rename = "redirectURL")]
    pub redirect_url: Option<String>,
    pub partner_context: Option<JsonValue>,
    pub filters: Option<JsonValue>,

    pub analytics: AnalyticsPayload,
}

/// Resolves host properties into a [`WidgetConfiguration`].
///
/// The only environment access is one read of the client-tracking store.
#[derive(Clone)]
pub struct ConfigResolver {
    store: Arc<dyn ClientTrackingStore>,
    collector_id: String,
}

impl ConfigResolver {
    pub fn new(store: impl ClientTrackingStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            collector_id: GTM_ID.to_string(),
        }
    }

    /// Resolver for environments with no persisted tracking values
    pub fn without_tracking() -> Self {
        Self::new(NoTracking)
    }

    pub fn with_collector_id(mut self, collector_id: impl Into<String>) -> Self {
        self.collector_id = collector_id.into();
        self
    }

    pub fn collector_id(&self) -> &str {
        &self.collector_id
    }

    /// Resolve `properties`. Total over its input; never mutates it.
    pub fn resolve(&self, properties: &HostProperties) -> WidgetConfiguration {
        let color = properties
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        let theme = Theme {
            theme_token: theme_token(&color),
            color,
            font_family: properties
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            class_name: properties.class_name.clone().unwrap_or_default(),
            dark_mode: properties.dark_mode.unwrap_or(false),
        };

        let analytics = AnalyticsPayload {
            collector_id: self.collector_id.clone(),
            data_layer: DataLayer {
                api_key: properties.api_key.clone(),
                client_id: self.store.get(CLIENT_ID_KEY),
            },
        };

        debug!(
            color = %theme.color,
            font_family = %theme.font_family,
            has_client_id = analytics.data_layer.client_id.is_some(),
            "Configuration resolved"
        );

        WidgetConfiguration {
            api_key: properties.api_key.clone(),
            default_amount: properties.default_amount,
            min_amount_eur: properties.min_amount_eur,
            default_crypto: properties.default_crypto.clone(),
            default_fiat: properties.default_fiat.clone(),
            default_fiat_soft: properties.default_fiat_soft.clone(),
            default_payment_method: properties.default_payment_method.clone(),
            default_address: properties.default_address.clone(),
            is_address_editable: properties.is_address_editable,
            country: properties.country.clone(),
            language: properties.language.clone(),
            theme,
            display_chat_bubble: properties.display_chat_bubble,
            support_sell: properties.support_sell,
            support_buy: properties.support_buy,
            is_amount_editable: properties.is_amount_editable,
            amount_in_crypto: properties.amount_in_crypto,
            recommended_crypto_currencies: properties.recommended_crypto_currencies.clone(),
            select_gateway_by: properties.select_gateway_by.clone(),
            redirect_url: properties.redirect_url.clone(),
            partner_context: properties.partner_context.clone(),
            filters: properties.filters.clone(),
            analytics,
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::without_tracking()
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("collector_id", &self.collector_id)
            .finish_non_exhaustive()
    }
}
