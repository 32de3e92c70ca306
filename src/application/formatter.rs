//! Output formatting for CLI display.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::Unit;

use super::download_service::DownloadOutcome;

/// Formats a table listing of the account's units.
pub fn format_units_table(units: &[Unit]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Unit ID", "Last Data", "Last Connection"]);

    for unit in units {
        table.add_row(vec![
            unit.unit_id.clone(),
            unit.last_data.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            unit.last_connection
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        ]);
    }

    table.to_string()
}

/// Formats the result of a download run for display.
pub fn format_outcome(outcome: &DownloadOutcome) -> String {
    let header = outcome.written.as_ref().map_or_else(
        || format!("{} No new data to export", "•".yellow().bold()),
        |written| {
            format!(
                "{} Export saved to {}",
                "✓".green().bold(),
                written.path.display()
            )
        },
    );

    let mut out = format!(
        "{header}\n  Units: {}\n  Since: {}",
        outcome.unit_count.to_string().cyan(),
        outcome.cursor.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(written) = &outcome.written {
        out.push_str(&format!(
            "\n  Size: {} bytes",
            written.bytes.to_string().cyan()
        ));
    }

    out
}
