use chrono::NaiveDateTime;

use super::{Dashboard, Phase};
use crate::humidity::{HumidityResponse, TIMESTAMP_FORMAT};

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// `YYYY-MM-DD HH:MM:SS` to `DD/MM/YYYY HH:MM:SS`; unparsable input is shown as is.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_or_else(|_| raw.to_string(), |at| at.format(DISPLAY_FORMAT).to_string())
}

/// Render the dashboard as plain text.
#[must_use]
pub fn render(dashboard: &Dashboard) -> String {
    let mut lines = vec![
        "Humidity Monitor".to_string(),
        "Real-time monitoring  [r] refresh  [c] clear history  [q] quit".to_string(),
    ];
    if dashboard.is_loading() {
        lines.push("Loading...".to_string());
    }
    lines.push(String::new());

    if let Phase::Error(message) = dashboard.phase() {
        lines.push(format!("Error: {message}"));
        lines.push(String::new());
    }

    if let Some(current) = dashboard.current() {
        lines.push("== Current status ==".to_string());
        lines.push(format!("  Condition:     {}", current.status.display_label()));
        lines.push(format!("  Value:         {} (0-1023)", current.value));
        lines.push(format!("  Last analysis: {}", format_timestamp(&current.analyzed_at)));
        lines.push(String::new());
    }

    lines.push("== History ==".to_string());
    if dashboard.readings().is_empty() {
        lines.push("  No humidity data available".to_string());
        lines.push("  Readings will appear here once the sensor reports".to_string());
    } else {
        lines.extend(
            dashboard
                .readings()
                .iter()
                .enumerate()
                .map(|(index, reading)| history_line(reading, index == 0)),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn history_line(reading: &HumidityResponse, most_recent: bool) -> String {
    let mut line = format!(
        "  {} {:<20} value {:<8} {}",
        if most_recent { '*' } else { '-' },
        reading.status.display_label(),
        reading.value,
        format_timestamp(&reading.analyzed_at),
    );
    if most_recent {
        line.push_str("  MOST RECENT");
    }
    line
}
