//! Logging setup for embedders and the preview binary.

use serde::Serialize;
use std::sync::Once;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Static initialization guard
static INIT: Once = Once::new();

/// Crates whose level follows [`LoggingConfig::default_level`]
const CRATES: [&str; 4] = [
    "exohood_events",
    "exohood_config",
    "exohood_view",
    "exohood_widget",
];

/// Logging configuration
#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
    /// Level for the exohood crates
    #[serde(skip_serializing)]
    pub default_level: Level,
    /// Per-module overrides, e.g. `("exohood_events::bus", Level::TRACE)`
    #[serde(skip_serializing)]
    pub component_levels: Vec<(String, Level)>,
    /// Whether to include target/module
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub use_ansi: bool,
    /// Extra directives appended verbatim
    pub component_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            component_levels: Vec::new(),
            include_target: true,
            use_ansi: true,
            component_filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_component_level(mut self, component: impl Into<String>, level: Level) -> Self {
        self.component_levels.push((component.into(), level));
        self
    }
}

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence over `config` when set. Only the first call
/// has any effect; a subscriber installed elsewhere is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(build_filter_string(&config)));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.include_target)
            .with_ansi(config.use_ansi)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();

        if installed {
            info!("Logging initialized with level: {}", config.default_level);
        }
    });
}

/// Build filter directives from configuration
pub fn build_filter_string(config: &LoggingConfig) -> String {
    let mut filter_str = String::from("warn");

    for name in CRATES {
        filter_str.push_str(&format!(",{}={}", name, config.default_level));
    }

    for (component, level) in &config.component_levels {
        filter_str.push_str(&format!(",{}={}", component, level));
    }

    if let Some(filter) = &config.component_filter {
        filter_str.push_str(&format!(",{}", filter));
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_crate() {
        assert_eq!(
            build_filter_string(&LoggingConfig::default()),
            "warn,exohood_events=INFO,exohood_config=INFO,exohood_view=INFO,exohood_widget=INFO"
        );
    }

    #[test]
    fn overrides_and_extra_directives_are_appended() {
        let config = LoggingConfig {
            component_filter: Some("hyper=off".to_string()),
            ..LoggingConfig::default()
                .with_level(Level::DEBUG)
                .with_component_level("exohood_events::bus", Level::TRACE)
        };

        let filter = build_filter_string(&config);
        assert!(filter.contains("exohood_view=DEBUG"));
        assert!(filter.ends_with(",exohood_events::bus=TRACE,hyper=off"));
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default().with_level(Level::TRACE));
    }
}
