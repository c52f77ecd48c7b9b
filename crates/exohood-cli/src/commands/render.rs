use crate::cli::RenderArgs;
use crate::home;
use anyhow::{Context, Result};
use exohood_config::HostProperties;
use exohood_view::RESET_ACTION;
use exohood_widget::{mount, MemoryDocument};
use tracing::{debug, info};

/// Mount the widget into an in-memory page and return what the host sees.
pub fn execute(args: &RenderArgs) -> Result<String> {
    let raw = std::fs::read_to_string(&args.props)
        .with_context(|| format!("Failed to read properties from {}", args.props.display()))?;
    let properties = HostProperties::from_json(&raw)
        .with_context(|| format!("Invalid properties in {}", args.props.display()))?;

    debug!(selector = %args.selector, crash = args.crash, "Rendering preview");

    let document = MemoryDocument::new()
        .with_element(args.selector.clone())
        .with_cookies(&args.cookies);

    let mut mounted = mount(&document, &args.selector, properties, home::factory(args.crash))
        .with_context(|| format!("No element matches {}", args.selector))?;

    if args.reset {
        match mounted.activate(RESET_ACTION) {
            Some(token) => info!(token = %token, "Preview reset"),
            None => info!("Reset skipped, widget did not fail"),
        }
    }

    if args.show_config {
        return serde_json::to_string_pretty(mounted.config().as_ref())
            .context("Failed to serialize configuration");
    }

    document
        .markup(&args.selector)
        .with_context(|| format!("Nothing committed to {}", args.selector))
}
