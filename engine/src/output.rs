// Plain text rendering of views for terminal output
use mission_shared::models::ViewResult;

use crate::config::DisplayConfig;

/// Renders a view as a two-column, left-aligned text table.
pub fn render_table(view: &ViewResult, display: &DisplayConfig) -> String {
    let rows: Vec<(String, String)> = view
        .rows
        .iter()
        .map(|row| (row.key.to_string(), display.format_value(&row.value)))
        .collect();
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", view.name));
    if rows.is_empty() {
        out.push_str("(no data)\n");
    }
    for (key, value) in rows {
        out.push_str(&format!("{:<width$}  {}\n", key, value, width = key_width));
    }
    out
}
