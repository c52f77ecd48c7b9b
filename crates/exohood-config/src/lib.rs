//! # Exohood Configuration
//!
//! Turns the property bag a host page passes to the widget into the
//! immutable configuration every downstream collaborator reads.
//!
//! ## Quick Start
//!
//! ```rust
//! use exohood_config::{ConfigResolver, CookieJar, HostProperties};
//!
//! let resolver = ConfigResolver::new(CookieJar::parse("_ga=GA1.2.3.4"));
//! let config = resolver.resolve(&HostProperties::new("k1").with_color("#112233"));
//!
//! assert_eq!(config.theme.theme_token, "112233");
//! assert_eq!(config.analytics.data_layer.client_id.as_deref(), Some("GA1.2.3.4"));
//! ```

#![warn(clippy::all)]

mod properties;
mod resolver;
mod tracking;

pub use properties::{ConfigError, HostProperties};
pub use resolver::{
    theme_token, AnalyticsPayload, ConfigResolver, DataLayer, Theme, WidgetConfiguration,
    DEFAULT_COLOR, DEFAULT_FONT_FAMILY, GTM_ID,
};
pub use tracking::{ClientTrackingStore, CookieJar, NoTracking, CLIENT_ID_KEY};
