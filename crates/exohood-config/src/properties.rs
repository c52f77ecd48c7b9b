//! The property bag a host page passes to the widget.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors from reading a host property bag.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The bag is not valid JSON or has a field of the wrong shape.
    #[error("Invalid host properties: {0}")]
    InvalidProperties(#[from] serde_json::Error),

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Host-facing name of the field
        field: &'static str,
    },
}

/// Host-supplied properties.
///
/// Every field except the API credential is optional. Field names follow the
/// host-facing contract (`API_KEY`, `defaultAmount`, `redirectURL`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostProperties {
    /// API credential, the only required field
    #[serde(rename = "API_KEY")]
    pub api_key: String,

    pub default_amount: Option<f64>,
    pub min_amount_eur: Option<f64>,

    pub default_crypto: Option<String>,
    pub default_fiat: Option<String>,
    pub default_fiat_soft: Option<String>,
    pub default_payment_method: Option<String>,

    #[serde(rename = "defaultAddrs")]
    pub default_address: Option<String>,
    pub is_address_editable: Option<bool>,

    pub country: Option<String>,
    pub language: Option<String>,

    /// Theme color in `#RRGGBB` form
    pub color: Option<String>,
    pub font_family: Option<String>,
    /// Extra CSS class merged onto the widget root
    pub class_name: Option<String>,
    pub dark_mode: Option<bool>,

    pub display_chat_bubble: Option<bool>,
    pub support_sell: Option<bool>,
    pub support_buy: Option<bool>,
    pub is_amount_editable: Option<bool>,
    pub amount_in_crypto: Option<bool>,

    pub recommended_crypto_currencies: Option<Vec<String>>,
    pub select_gateway_by: Option<String>,

    #[serde(rename = "redirectURL")]
    pub redirect_url: Option<String>,

    /// Opaque to the runtime
    pub partner_context: Option<JsonValue>,
    /// Opaque to the runtime
    pub filters: Option<JsonValue>,
}

impl HostProperties {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON property bag
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let properties: Self = serde_json::from_str(json)?;
        properties.validate()?;
        Ok(properties)
    }

    /// Parse and validate an already-decoded JSON value
    pub fn from_value(value: JsonValue) -> Result<Self, ConfigError> {
        let properties: Self = serde_json::from_value(value)?;
        properties.validate()?;
        Ok(properties)
    }

    /// Check the credential is present.
    ///
    /// Resolution never calls this; it is for callers that accept untrusted bags.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "API_KEY" });
        }
        Ok(())
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = Some(dark_mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_host_field_names() {
        let properties = HostProperties::from_value(json!({
            "API_KEY": "k1",
            "defaultAmount": 150.0,
            "defaultAddrs": "bc1qexample",
            "defaultFiatSoft": "EUR",
            "isAddressEditable": false,
            "redirectURL": "https://host.example/done",
            "recommendedCryptoCurrencies": ["BTC", "ETH"],
            "filters": {"onlyCryptos": ["BTC"]}
        }))
        .unwrap();

        assert_eq!(properties.api_key, "k1");
        assert_eq!(properties.default_amount, Some(150.0));
        assert_eq!(properties.default_address.as_deref(), Some("bc1qexample"));
        assert_eq!(properties.default_fiat_soft.as_deref(), Some("EUR"));
        assert_eq!(properties.is_address_editable, Some(false));
        assert_eq!(
            properties.redirect_url.as_deref(),
            Some("https://host.example/done")
        );
        assert_eq!(
            properties.recommended_crypto_currencies,
            Some(vec!["BTC".to_string(), "ETH".to_string()])
        );
        assert_eq!(properties.filters, Some(json!({"onlyCryptos": ["BTC"]})));
        assert_eq!(properties.color, None);
    }

    #[test]
    fn missing_credential_field_is_a_parse_error() {
        let result = HostProperties::from_json(r##"{"color": "#112233"}"##);
        assert!(matches!(result, Err(ConfigError::InvalidProperties(_))));
    }

    #[test]
    fn blank_credential_fails_validation() {
        let result = HostProperties::from_json(r#"{"API_KEY": "   "}"#);
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "API_KEY" })
        ));
    }

    #[test]
    fn wrong_field_shape_is_rejected() {
        let result = HostProperties::from_json(r#"{"API_KEY": "k1", "darkMode": "yes"}"#);
        assert!(matches!(result, Err(ConfigError::InvalidProperties(_))));
    }

    #[test]
    fn builder_sets_presentation_fields() {
        let properties = HostProperties::new("k1")
            .with_color("#112233")
            .with_font_family("Inter")
            .with_class_name("host-widget")
            .with_dark_mode(true);

        assert_eq!(properties.color.as_deref(), Some("#112233"));
        assert_eq!(properties.font_family.as_deref(), Some("Inter"));
        assert_eq!(properties.class_name.as_deref(), Some("host-widget"));
        assert_eq!(properties.dark_mode, Some(true));
        assert!(properties.validate().is_ok());
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = ConfigError::MissingField { field: "API_KEY" };
        assert_eq!(err.to_string(), "Missing required field: API_KEY");
    }
}
