use anyhow::{Context, Result};
use exohood_events::EVENTS;

/// Render the event catalog, one `NAME  type` line per entry or as JSON.
pub fn execute(json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(&*EVENTS).context("Failed to serialize event catalog");
    }

    let width = EVENTS.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let lines: Vec<String> = EVENTS
        .iter()
        .map(|(name, event_type)| format!("{:width$}  {}", name, event_type, width = width))
        .collect();

    Ok(lines.join("\n"))
}
